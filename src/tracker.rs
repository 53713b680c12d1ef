//! State mutations behind every user action.
//!
//! Each operation validates its input, updates `AppData` in place and returns
//! the record it produced. Persisting the result is the caller's job.

use crate::errors::TrackerError;
use crate::metrics::validate_profile;
use crate::models::{
    ActivityEntry, ActivityLibraryItem, AppData, FoodEntry, FoodLibraryItem, MealComponent,
    MealItem, Profile, WeightEntry,
};
use crate::stats::{validate_activity_entry, validate_food_entry};
use chrono::NaiveDate;
use std::collections::HashSet;

const UNNAMED_MEAL: &str = "Unnamed meal";
const MIN_SEARCH_LEN: usize = 2;

pub fn save_profile(data: &mut AppData, profile: Profile) -> Result<Profile, TrackerError> {
    validate_profile(&profile)?;
    data.profile = Some(profile.clone());
    Ok(profile)
}

/// Inserts or replaces the entry for `entry.date`.
pub fn upsert_weight(data: &mut AppData, entry: WeightEntry) -> Result<WeightEntry, TrackerError> {
    if !entry.weight_kg.is_finite() || entry.weight_kg <= 0.0 {
        return Err(TrackerError::InvalidEntry(format!(
            "weight must be a positive number, got {}",
            entry.weight_kg
        )));
    }

    match data.weights.iter_mut().find(|existing| existing.date == entry.date) {
        Some(existing) => existing.weight_kg = entry.weight_kg,
        None => data.weights.push(entry.clone()),
    }

    let is_latest = data.weights.iter().all(|existing| existing.date <= entry.date);
    if is_latest {
        if let Some(profile) = data.profile.as_mut() {
            profile.current_weight_kg = entry.weight_kg;
        }
    }

    Ok(entry)
}

pub fn delete_weight(data: &mut AppData, date: NaiveDate) -> Result<WeightEntry, TrackerError> {
    let index = data
        .weights
        .iter()
        .position(|entry| entry.date == date)
        .ok_or_else(|| TrackerError::NotFound(format!("weight entry for {date}")))?;
    let removed = data.weights.remove(index);

    let was_latest = data.weights.iter().all(|entry| entry.date < removed.date);
    if was_latest {
        let latest = data.weights.iter().max_by_key(|entry| entry.date);
        if let (Some(profile), Some(latest)) = (data.profile.as_mut(), latest) {
            profile.current_weight_kg = latest.weight_kg;
        }
    }

    Ok(removed)
}

pub fn add_food_entry(data: &mut AppData, mut entry: FoodEntry) -> Result<FoodEntry, TrackerError> {
    entry.name = require_name(&entry.name)?;
    validate_food_entry(&entry)?;
    entry.id = next_id(data);
    data.foods.push(entry.clone());
    Ok(entry)
}

pub fn delete_food_entry(data: &mut AppData, id: u64) -> Result<FoodEntry, TrackerError> {
    let index = data
        .foods
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| TrackerError::NotFound(format!("food entry {id}")))?;
    Ok(data.foods.remove(index))
}

pub fn add_activity_entry(
    data: &mut AppData,
    mut entry: ActivityEntry,
) -> Result<ActivityEntry, TrackerError> {
    entry.name = require_name(&entry.name)?;
    validate_activity_entry(&entry)?;
    entry.id = next_id(data);
    data.activities.push(entry.clone());
    Ok(entry)
}

pub fn delete_activity_entry(data: &mut AppData, id: u64) -> Result<ActivityEntry, TrackerError> {
    let index = data
        .activities
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| TrackerError::NotFound(format!("activity entry {id}")))?;
    Ok(data.activities.remove(index))
}

/// Builds one food entry from library items, scaling each by `grams / portion_g`.
pub fn compose_meal(
    data: &mut AppData,
    name: &str,
    date: NaiveDate,
    items: &[MealItem],
) -> Result<FoodEntry, TrackerError> {
    if items.is_empty() {
        return Err(TrackerError::InvalidEntry(
            "a meal needs at least one food".to_string(),
        ));
    }

    let mut meal = FoodEntry {
        id: 0,
        name: match name.trim() {
            "" => UNNAMED_MEAL.to_string(),
            trimmed => trimmed.to_string(),
        },
        date,
        calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
        items: Vec::with_capacity(items.len()),
    };

    for item in items {
        if !item.grams.is_finite() || item.grams <= 0.0 {
            return Err(TrackerError::InvalidEntry(format!(
                "quantity of '{}' must be a positive number of grams",
                item.name
            )));
        }
        let food = find_food(&data.food_library, &item.name)
            .ok_or_else(|| TrackerError::NotFound(format!("food '{}'", item.name)))?;
        let scale = item.grams / food.portion_g;
        let calories = food.calories * scale;
        meal.calories += calories;
        meal.protein_g += food.protein_g * scale;
        meal.carbs_g += food.carbs_g * scale;
        meal.fat_g += food.fat_g * scale;
        meal.items.push(MealComponent {
            name: food.name.clone(),
            grams: item.grams,
            calories,
        });
    }

    add_food_entry(data, meal)
}

/// Logs an activity using the library's per-minute burn rate.
pub fn activity_from_library(
    data: &mut AppData,
    name: &str,
    date: NaiveDate,
    duration_min: f64,
) -> Result<ActivityEntry, TrackerError> {
    let item = data
        .activity_library
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| TrackerError::NotFound(format!("activity '{name}'")))?;

    let entry = ActivityEntry {
        id: 0,
        name: item.name.clone(),
        date,
        duration_min,
        calories: item.calories_per_minute * duration_min,
    };
    add_activity_entry(data, entry)
}

pub fn add_library_food(
    data: &mut AppData,
    mut item: FoodLibraryItem,
) -> Result<FoodLibraryItem, TrackerError> {
    item.name = require_name(&item.name)?;
    if !item.calories.is_finite() || item.calories <= 0.0 {
        return Err(TrackerError::InvalidEntry(
            "a library food needs a name and positive calories".to_string(),
        ));
    }
    for value in [item.protein_g, item.carbs_g, item.fat_g] {
        if !value.is_finite() || value < 0.0 {
            return Err(TrackerError::InvalidEntry(format!(
                "macros of '{}' must be non-negative",
                item.name
            )));
        }
    }
    if !item.portion_g.is_finite() || item.portion_g <= 0.0 {
        return Err(TrackerError::InvalidEntry(format!(
            "portion of '{}' must be positive",
            item.name
        )));
    }
    if find_food(&data.food_library, &item.name).is_some() {
        return Err(TrackerError::InvalidEntry(format!(
            "'{}' is already in the library",
            item.name
        )));
    }

    data.food_library.push(item.clone());
    Ok(item)
}

pub fn delete_library_food(data: &mut AppData, name: &str) -> Result<FoodLibraryItem, TrackerError> {
    let index = data
        .food_library
        .iter()
        .position(|item| item.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| TrackerError::NotFound(format!("food '{name}'")))?;
    Ok(data.food_library.remove(index))
}

/// Case-insensitive substring search. Terms under two characters match nothing.
pub fn search_food_library<'a>(data: &'a AppData, term: &str) -> Vec<&'a FoodLibraryItem> {
    let term = term.trim().to_lowercase();
    if term.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }
    data.food_library
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&term))
        .collect()
}

pub fn add_library_activity(
    data: &mut AppData,
    mut item: ActivityLibraryItem,
) -> Result<ActivityLibraryItem, TrackerError> {
    item.name = require_name(&item.name)?;
    if !item.calories_per_minute.is_finite() || item.calories_per_minute <= 0.0 {
        return Err(TrackerError::InvalidEntry(format!(
            "calories per minute of '{}' must be positive",
            item.name
        )));
    }
    if data
        .activity_library
        .iter()
        .any(|existing| existing.name.eq_ignore_ascii_case(&item.name))
    {
        return Err(TrackerError::InvalidEntry(format!(
            "'{}' is already in the library",
            item.name
        )));
    }

    data.activity_library.push(item.clone());
    Ok(item)
}

pub fn delete_library_activity(
    data: &mut AppData,
    name: &str,
) -> Result<ActivityLibraryItem, TrackerError> {
    let index = data
        .activity_library
        .iter()
        .position(|item| item.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| TrackerError::NotFound(format!("activity '{name}'")))?;
    Ok(data.activity_library.remove(index))
}

/// Repairs documents written before weights were unique per date and entry
/// ids were assigned. The last weight recorded for a date wins.
pub fn normalize(data: &mut AppData) -> usize {
    let mut seen = HashSet::new();
    let before = data.weights.len();
    let mut deduped: Vec<WeightEntry> = data
        .weights
        .drain(..)
        .rev()
        .filter(|entry| seen.insert(entry.date))
        .collect();
    deduped.reverse();
    data.weights = deduped;

    let max_id = data
        .foods
        .iter()
        .map(|entry| entry.id)
        .chain(data.activities.iter().map(|entry| entry.id))
        .max()
        .unwrap_or(0);
    data.next_id = data.next_id.max(max_id);
    for index in 0..data.foods.len() {
        if data.foods[index].id == 0 {
            let id = next_id(data);
            data.foods[index].id = id;
        }
    }
    for index in 0..data.activities.len() {
        if data.activities[index].id == 0 {
            let id = next_id(data);
            data.activities[index].id = id;
        }
    }

    before - data.weights.len()
}

fn next_id(data: &mut AppData) -> u64 {
    data.next_id += 1;
    data.next_id
}

fn find_food<'a>(library: &'a [FoodLibraryItem], name: &str) -> Option<&'a FoodLibraryItem> {
    let name = name.trim();
    library.iter().find(|item| item.name.eq_ignore_ascii_case(name))
}

fn require_name(name: &str) -> Result<String, TrackerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::InvalidEntry("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Intensity};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn library_data() -> AppData {
        let mut data = AppData::default();
        data.food_library.push(FoodLibraryItem {
            name: "Chicken breast".to_string(),
            calories: 165.0,
            protein_g: 31.0,
            carbs_g: 0.0,
            fat_g: 3.6,
            portion_g: 100.0,
        });
        data.food_library.push(FoodLibraryItem {
            name: "Apple".to_string(),
            calories: 52.0,
            protein_g: 0.3,
            carbs_g: 14.0,
            fat_g: 0.2,
            portion_g: 100.0,
        });
        data.activity_library.push(ActivityLibraryItem {
            name: "Cycling".to_string(),
            calories_per_minute: 8.0,
            intensity: Intensity::High,
        });
        data
    }

    fn food_entry(name: &str, calories: f64) -> FoodEntry {
        FoodEntry {
            id: 0,
            name: name.to_string(),
            date: day(1),
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            items: Vec::new(),
        }
    }

    #[test]
    fn weight_upsert_replaces_same_date() {
        let mut data = AppData::default();
        upsert_weight(&mut data, WeightEntry { date: day(1), weight_kg: 80.0 }).unwrap();
        upsert_weight(&mut data, WeightEntry { date: day(1), weight_kg: 79.4 }).unwrap();
        upsert_weight(&mut data, WeightEntry { date: day(2), weight_kg: 79.0 }).unwrap();
        assert_eq!(data.weights.len(), 2);
        assert_eq!(data.weights[0].weight_kg, 79.4);
    }

    #[test]
    fn weight_upsert_rejects_invalid_values() {
        let mut data = AppData::default();
        for weight_kg in [0.0, -1.0, f64::NAN] {
            let result = upsert_weight(&mut data, WeightEntry { date: day(1), weight_kg });
            assert!(matches!(result, Err(TrackerError::InvalidEntry(_))));
        }
        assert!(data.weights.is_empty());
    }

    #[test]
    fn latest_weight_updates_profile() {
        let mut data = AppData::default();
        save_profile(
            &mut data,
            Profile {
                gender: Gender::Female,
                age: 35.0,
                height_cm: 168.0,
                activity_factor: 1.375,
                goal_weight_kg: 60.0,
                goal_date: day(28),
                current_weight_kg: 66.0,
            },
        )
        .unwrap();

        upsert_weight(&mut data, WeightEntry { date: day(10), weight_kg: 65.0 }).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 65.0);

        // back-filling an older date leaves the current weight alone
        upsert_weight(&mut data, WeightEntry { date: day(3), weight_kg: 65.8 }).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 65.0);
    }

    #[test]
    fn delete_weight_by_date() {
        let mut data = AppData::default();
        upsert_weight(&mut data, WeightEntry { date: day(1), weight_kg: 80.0 }).unwrap();
        assert_eq!(delete_weight(&mut data, day(1)).unwrap().weight_kg, 80.0);
        assert!(matches!(
            delete_weight(&mut data, day(1)),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn deleting_latest_weight_restores_previous_current_weight() {
        let mut data = AppData::default();
        save_profile(
            &mut data,
            Profile {
                gender: Gender::Male,
                age: 40.0,
                height_cm: 180.0,
                activity_factor: 1.2,
                goal_weight_kg: 78.0,
                goal_date: day(28),
                current_weight_kg: 84.0,
            },
        )
        .unwrap();
        upsert_weight(&mut data, WeightEntry { date: day(2), weight_kg: 83.0 }).unwrap();
        upsert_weight(&mut data, WeightEntry { date: day(9), weight_kg: 82.1 }).unwrap();
        upsert_weight(&mut data, WeightEntry { date: day(5), weight_kg: 82.6 }).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 82.1);

        // an older entry going away does not move the current weight
        delete_weight(&mut data, day(2)).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 82.1);

        delete_weight(&mut data, day(9)).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 82.6);

        // with nothing left the last known value stays
        delete_weight(&mut data, day(5)).unwrap();
        assert_eq!(data.profile.as_ref().unwrap().current_weight_kg, 82.6);
    }

    #[test]
    fn save_profile_rejects_invalid() {
        let mut data = AppData::default();
        let result = save_profile(
            &mut data,
            Profile {
                gender: Gender::Male,
                age: 0.0,
                height_cm: 180.0,
                activity_factor: 1.2,
                goal_weight_kg: 80.0,
                goal_date: day(1),
                current_weight_kg: 85.0,
            },
        );
        assert!(matches!(result, Err(TrackerError::InvalidProfile(_))));
        assert!(data.profile.is_none());
    }

    #[test]
    fn food_entries_get_distinct_ids_and_delete() {
        let mut data = AppData::default();
        let first = add_food_entry(&mut data, food_entry("Breakfast", 400.0)).unwrap();
        let second = add_food_entry(&mut data, food_entry("Breakfast", 400.0)).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(data.foods.len(), 2);

        delete_food_entry(&mut data, first.id).unwrap();
        assert_eq!(data.foods.len(), 1);
        assert_eq!(data.foods[0].id, second.id);
        assert!(delete_food_entry(&mut data, first.id).is_err());
    }

    #[test]
    fn food_entry_requires_name_and_valid_values() {
        let mut data = AppData::default();
        assert!(add_food_entry(&mut data, food_entry("  ", 100.0)).is_err());
        assert!(add_food_entry(&mut data, food_entry("Snack", -1.0)).is_err());
        assert!(data.foods.is_empty());
    }

    #[test]
    fn meal_scales_library_portions() {
        let mut data = library_data();
        let items = vec![
            MealItem { name: "chicken breast".to_string(), grams: 150.0 },
            MealItem { name: "Apple".to_string(), grams: 100.0 },
        ];
        let meal = compose_meal(&mut data, "  ", day(5), &items).unwrap();
        assert_eq!(meal.name, UNNAMED_MEAL);
        assert!((meal.calories - (165.0 * 1.5 + 52.0)).abs() < 1e-9);
        assert!((meal.protein_g - (31.0 * 1.5 + 0.3)).abs() < 1e-9);
        assert!((meal.carbs_g - 14.0).abs() < 1e-9);
        assert_eq!(data.foods.len(), 1);
        assert_eq!(data.foods[0].date, day(5));

        let names: Vec<&str> = meal.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken breast", "Apple"]);
        assert_eq!(meal.items[0].grams, 150.0);
        assert!((meal.items[0].calories - 247.5).abs() < 1e-9);
        assert_eq!(meal.items[1].calories, 52.0);
        assert_eq!(data.foods[0].items, meal.items);
    }

    #[test]
    fn meal_rejects_empty_or_unknown_items() {
        let mut data = library_data();
        assert!(matches!(
            compose_meal(&mut data, "Lunch", day(5), &[]),
            Err(TrackerError::InvalidEntry(_))
        ));
        let unknown = vec![MealItem { name: "Durian".to_string(), grams: 100.0 }];
        assert!(matches!(
            compose_meal(&mut data, "Lunch", day(5), &unknown),
            Err(TrackerError::NotFound(_))
        ));
        assert!(data.foods.is_empty());
    }

    #[test]
    fn activity_from_library_uses_burn_rate() {
        let mut data = library_data();
        let entry = activity_from_library(&mut data, "cycling", day(2), 45.0).unwrap();
        assert_eq!(entry.name, "Cycling");
        assert_eq!(entry.calories, 360.0);
        assert_eq!(data.activities.len(), 1);
        assert!(activity_from_library(&mut data, "Rowing", day(2), 10.0).is_err());
    }

    #[test]
    fn activity_entries_add_and_delete() {
        let mut data = AppData::default();
        let entry = add_activity_entry(
            &mut data,
            ActivityEntry {
                id: 0,
                name: "Walk".to_string(),
                date: day(1),
                duration_min: 40.0,
                calories: 160.0,
            },
        )
        .unwrap();
        assert!(entry.id > 0);
        delete_activity_entry(&mut data, entry.id).unwrap();
        assert!(data.activities.is_empty());
    }

    #[test]
    fn library_search_needs_two_characters() {
        let data = library_data();
        assert!(search_food_library(&data, "a").is_empty());
        let hits = search_food_library(&data, " AP ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Apple");
        assert_eq!(search_food_library(&data, "e").len(), 0);
        assert_eq!(search_food_library(&data, "zz").len(), 0);
    }

    #[test]
    fn library_food_validation_and_delete() {
        let mut data = library_data();
        let item = FoodLibraryItem {
            name: "Rice".to_string(),
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            portion_g: 100.0,
        };
        assert!(add_library_food(&mut data, item.clone()).is_err());
        let rice = FoodLibraryItem { calories: 130.0, ..item };
        add_library_food(&mut data, rice.clone()).unwrap();
        assert!(add_library_food(&mut data, rice).is_err());
        delete_library_food(&mut data, "rice").unwrap();
        assert_eq!(data.food_library.len(), 2);
    }

    #[test]
    fn library_activity_add_and_delete() {
        let mut data = library_data();
        add_library_activity(
            &mut data,
            ActivityLibraryItem {
                name: "Swimming".to_string(),
                calories_per_minute: 9.5,
                intensity: Intensity::High,
            },
        )
        .unwrap();
        assert_eq!(data.activity_library.len(), 2);
        delete_library_activity(&mut data, "Swimming").unwrap();
        assert!(delete_library_activity(&mut data, "Swimming").is_err());
    }

    #[test]
    fn normalize_keeps_last_weight_per_date_and_assigns_ids() {
        let mut data = AppData::default();
        data.weights = vec![
            WeightEntry { date: day(1), weight_kg: 80.0 },
            WeightEntry { date: day(2), weight_kg: 79.5 },
            WeightEntry { date: day(1), weight_kg: 80.4 },
        ];
        data.foods = vec![food_entry("a", 10.0), food_entry("b", 20.0)];
        data.foods[1].id = 7;

        let removed = normalize(&mut data);
        assert_eq!(removed, 1);
        assert_eq!(data.weights.len(), 2);
        let day_one = data.weights.iter().find(|w| w.date == day(1)).unwrap();
        assert_eq!(day_one.weight_kg, 80.4);
        assert_eq!(data.foods[0].id, 8);
        assert_eq!(data.foods[1].id, 7);
        assert_eq!(data.next_id, 8);
    }
}

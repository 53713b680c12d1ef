use crate::errors::TrackerError;
use crate::history::most_recent;
use crate::metrics::compute_metrics;
use crate::models::{
    ActivityEntry, ActivityTotals, AppData, CaloriePoint, Dashboard, FoodEntry, FoodTotals,
};
use chrono::{Duration, Local, NaiveDate};

const RECENT_LIMIT: usize = 5;
const SERIES_DAYS: i64 = 7;

pub fn food_totals(entries: &[FoodEntry], date: NaiveDate) -> Result<FoodTotals, TrackerError> {
    let mut totals = FoodTotals::default();
    for entry in entries {
        validate_food_entry(entry)?;
        if entry.date != date {
            continue;
        }
        totals.total_calories += entry.calories;
        totals.total_protein_g += entry.protein_g;
        totals.total_carbs_g += entry.carbs_g;
        totals.total_fat_g += entry.fat_g;
    }
    Ok(totals)
}

pub fn activity_totals(
    entries: &[ActivityEntry],
    date: NaiveDate,
) -> Result<ActivityTotals, TrackerError> {
    let mut totals = ActivityTotals::default();
    for entry in entries {
        validate_activity_entry(entry)?;
        if entry.date == date {
            totals.total_calories += entry.calories;
        }
    }
    Ok(totals)
}

pub fn validate_food_entry(entry: &FoodEntry) -> Result<(), TrackerError> {
    for (field, value) in [
        ("calories", entry.calories),
        ("protein", entry.protein_g),
        ("carbs", entry.carbs_g),
        ("fat", entry.fat_g),
    ] {
        require_non_negative(&entry.name, field, value)?;
    }
    Ok(())
}

pub fn validate_activity_entry(entry: &ActivityEntry) -> Result<(), TrackerError> {
    require_non_negative(&entry.name, "duration", entry.duration_min)?;
    require_non_negative(&entry.name, "calories", entry.calories)
}

fn require_non_negative(name: &str, field: &str, value: f64) -> Result<(), TrackerError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrackerError::InvalidEntry(format!(
            "{field} of '{name}' must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

pub fn build_dashboard(data: &AppData) -> Result<Dashboard, TrackerError> {
    build_dashboard_at(Local::now().date_naive(), data)
}

pub fn build_dashboard_at(today: NaiveDate, data: &AppData) -> Result<Dashboard, TrackerError> {
    let food = food_totals(&data.foods, today)?;
    let burned = activity_totals(&data.activities, today)?.total_calories;
    let net_calories = food.total_calories - burned;

    let recent_weights = most_recent(&data.weights, RECENT_LIMIT);
    let current_weight_kg = recent_weights
        .first()
        .map(|entry| entry.weight_kg)
        .or_else(|| data.profile.as_ref().map(|profile| profile.current_weight_kg));

    let metrics = data
        .profile
        .as_ref()
        .and_then(|profile| compute_metrics(profile).ok());
    let remaining_calories = metrics.map(|m| m.target_calories as f64 - net_calories);

    Ok(Dashboard {
        date: today,
        current_weight_kg,
        food,
        burned_calories: burned,
        net_calories,
        metrics,
        remaining_calories,
        recent_foods: most_recent(&data.foods, RECENT_LIMIT),
        recent_weights,
    })
}

pub fn calorie_series(data: &AppData) -> Result<Vec<CaloriePoint>, TrackerError> {
    calorie_series_at(Local::now().date_naive(), data)
}

/// Consumed, burned and net calories for the last seven days, oldest first.
pub fn calorie_series_at(
    today: NaiveDate,
    data: &AppData,
) -> Result<Vec<CaloriePoint>, TrackerError> {
    let mut series = Vec::with_capacity(SERIES_DAYS as usize);
    for offset in (0..SERIES_DAYS).rev() {
        let date = today - Duration::days(offset);
        let consumed = food_totals(&data.foods, date)?.total_calories;
        let burned = activity_totals(&data.activities, date)?.total_calories;
        series.push(CaloriePoint {
            date,
            consumed,
            burned,
            net: consumed - burned,
        });
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Profile, WeightEntry};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn food(name: &str, d: u32, calories: f64, protein_g: f64) -> FoodEntry {
        FoodEntry {
            id: 0,
            name: name.to_string(),
            date: day(d),
            calories,
            protein_g,
            carbs_g: 0.0,
            fat_g: 0.0,
            items: Vec::new(),
        }
    }

    fn activity(d: u32, calories: f64) -> ActivityEntry {
        ActivityEntry {
            id: 0,
            name: "Running".to_string(),
            date: day(d),
            duration_min: 30.0,
            calories,
        }
    }

    #[test]
    fn food_totals_filter_on_date() {
        let entries = vec![food("toast", 1, 200.0, 10.0), food("soup", 2, 300.0, 0.0)];
        let totals = food_totals(&entries, day(1)).unwrap();
        assert_eq!(
            totals,
            FoodTotals {
                total_calories: 200.0,
                total_protein_g: 10.0,
                total_carbs_g: 0.0,
                total_fat_g: 0.0,
            }
        );
    }

    #[test]
    fn missing_macros_deserialize_as_zero() {
        let entry: FoodEntry =
            serde_json::from_str(r#"{"name":"soup","date":"2024-01-02","calories":300}"#).unwrap();
        assert_eq!(entry.protein_g, 0.0);
        assert_eq!(entry.fat_g, 0.0);
        let totals = food_totals(&[entry], day(2)).unwrap();
        assert_eq!(totals.total_calories, 300.0);
        assert_eq!(totals.total_carbs_g, 0.0);
    }

    #[test]
    fn empty_day_yields_zero() {
        let entries = vec![food("toast", 1, 200.0, 10.0)];
        assert_eq!(food_totals(&entries, day(9)).unwrap(), FoodTotals::default());
        assert_eq!(food_totals(&[], day(1)).unwrap(), FoodTotals::default());
        assert_eq!(activity_totals(&[], day(1)).unwrap().total_calories, 0.0);
    }

    #[test]
    fn order_does_not_matter_and_input_is_unchanged() {
        let entries = vec![
            food("a", 1, 120.0, 3.0),
            food("b", 1, 80.0, 4.0),
            food("c", 1, 50.0, 1.0),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();
        let first = food_totals(&entries, day(1)).unwrap();
        assert_eq!(first, food_totals(&reversed, day(1)).unwrap());
        assert_eq!(first, food_totals(&entries, day(1)).unwrap());
        assert_eq!(entries[0].name, "a");
    }

    #[test]
    fn rejects_negative_or_non_finite_values() {
        let entries = vec![food("bad", 1, -5.0, 0.0)];
        assert!(matches!(food_totals(&entries, day(1)), Err(TrackerError::InvalidEntry(_))));

        let entries = vec![food("nan", 3, 10.0, f64::NAN)];
        assert!(matches!(food_totals(&entries, day(1)), Err(TrackerError::InvalidEntry(_))));

        let entries = vec![activity(1, f64::INFINITY)];
        assert!(matches!(
            activity_totals(&entries, day(1)),
            Err(TrackerError::InvalidEntry(_))
        ));
    }

    #[test]
    fn activity_totals_sum_same_day() {
        let entries = vec![activity(1, 250.0), activity(1, 100.0), activity(2, 400.0)];
        assert_eq!(activity_totals(&entries, day(1)).unwrap().total_calories, 350.0);
    }

    #[test]
    fn dashboard_combines_today() {
        let mut data = AppData::default();
        data.profile = Some(Profile {
            gender: Gender::Male,
            age: 30.0,
            height_cm: 175.0,
            activity_factor: 1.55,
            goal_weight_kg: 70.0,
            goal_date: day(31),
            current_weight_kg: 80.0,
        });
        data.weights = vec![
            WeightEntry { date: day(3), weight_kg: 78.5 },
            WeightEntry { date: day(1), weight_kg: 79.0 },
        ];
        data.foods = vec![food("lunch", 4, 700.0, 30.0), food("dinner", 4, 900.0, 40.0)];
        data.activities = vec![activity(4, 300.0)];

        let dashboard = build_dashboard_at(day(4), &data).unwrap();
        assert_eq!(dashboard.current_weight_kg, Some(78.5));
        assert_eq!(dashboard.food.total_calories, 1600.0);
        assert_eq!(dashboard.food.total_protein_g, 70.0);
        assert_eq!(dashboard.burned_calories, 300.0);
        assert_eq!(dashboard.net_calories, 1300.0);
        let metrics = dashboard.metrics.expect("metrics");
        assert_eq!(
            dashboard.remaining_calories,
            Some(metrics.target_calories as f64 - 1300.0)
        );
        assert_eq!(dashboard.recent_weights[0].date, day(3));
        assert_eq!(dashboard.recent_foods.len(), 2);
    }

    #[test]
    fn dashboard_without_profile_or_weights() {
        let dashboard = build_dashboard_at(day(4), &AppData::default()).unwrap();
        assert_eq!(dashboard.current_weight_kg, None);
        assert!(dashboard.metrics.is_none());
        assert!(dashboard.remaining_calories.is_none());
        assert!(dashboard.recent_foods.is_empty());
    }

    #[test]
    fn calorie_series_covers_last_seven_days() {
        let mut data = AppData::default();
        data.foods = vec![food("old", 1, 500.0, 0.0), food("today", 10, 1800.0, 0.0)];
        data.activities = vec![activity(8, 200.0)];

        let series = calorie_series_at(day(10), &data).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day(4));
        assert_eq!(series[6].date, day(10));
        assert_eq!(series[6].consumed, 1800.0);
        assert_eq!(series[4].burned, 200.0);
        assert_eq!(series[4].net, -200.0);
        assert!(series.iter().all(|point| point.date != day(1)));
    }
}

use crate::errors::AppError;
use crate::models::{
    ActivityLibraryItem, AppData, FoodEntry, FoodLibraryItem, Intensity, MealComponent,
    WeightEntry, default_portion_g,
};
use crate::tracker::normalize;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Either the current document or the older layout where `foods` held the
/// library and eaten meals lived under `meals`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Legacy(LegacyData),
    Current(AppData),
}

#[derive(Deserialize)]
struct LegacyData {
    #[serde(default)]
    weights: Vec<WeightEntry>,
    #[serde(default)]
    foods: Vec<FoodLibraryItem>,
    meals: Vec<LegacyMeal>,
}

#[derive(Deserialize)]
struct LegacyMeal {
    #[serde(default)]
    id: u64,
    name: String,
    date: NaiveDate,
    #[serde(default)]
    foods: Vec<LegacyMealFood>,
    calories: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyMealFood {
    name: String,
    calories: f64,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    fat: f64,
    #[serde(default = "default_portion_g")]
    quantity: f64,
    total_calories: Option<f64>,
}

impl From<LegacyData> for AppData {
    fn from(legacy: LegacyData) -> Self {
        let foods = legacy
            .meals
            .into_iter()
            .map(|meal| {
                let mut entry = FoodEntry {
                    id: meal.id,
                    name: meal.name,
                    date: meal.date,
                    calories: meal.calories,
                    protein_g: 0.0,
                    carbs_g: 0.0,
                    fat_g: 0.0,
                    items: Vec::with_capacity(meal.foods.len()),
                };
                for food in meal.foods {
                    let scale = food.quantity / default_portion_g();
                    entry.protein_g += food.protein * scale;
                    entry.carbs_g += food.carbs * scale;
                    entry.fat_g += food.fat * scale;
                    entry.items.push(MealComponent {
                        calories: food.total_calories.unwrap_or(food.calories * scale),
                        name: food.name,
                        grams: food.quantity,
                    });
                }
                entry
            })
            .collect();

        AppData {
            weights: legacy.weights,
            foods,
            food_library: legacy.foods,
            activity_library: default_activity_library(),
            ..AppData::default()
        }
    }
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<StoredDocument>(&bytes) {
            Ok(document) => {
                let mut data = match document {
                    StoredDocument::Current(data) => data,
                    StoredDocument::Legacy(legacy) => {
                        info!("converting meals-based data file at {}", path.display());
                        AppData::from(legacy)
                    }
                };
                let dropped = normalize(&mut data);
                if dropped > 0 {
                    warn!("dropped {dropped} duplicate weight entries while loading");
                }
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                seeded_data()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}, starting with default libraries", path.display());
            seeded_data()
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            seeded_data()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Empty history with the stock food and activity libraries.
pub fn seeded_data() -> AppData {
    AppData {
        food_library: default_food_library(),
        activity_library: default_activity_library(),
        ..AppData::default()
    }
}

fn default_food_library() -> Vec<FoodLibraryItem> {
    [
        ("Apple", 52.0, 0.3, 14.0, 0.2),
        ("Chicken breast", 165.0, 31.0, 0.0, 3.6),
        ("White rice, cooked", 130.0, 2.7, 28.0, 0.3),
        ("Plain yogurt", 59.0, 3.5, 4.7, 3.3),
    ]
    .into_iter()
    .map(|(name, calories, protein_g, carbs_g, fat_g)| FoodLibraryItem {
        name: name.to_string(),
        calories,
        protein_g,
        carbs_g,
        fat_g,
        portion_g: 100.0,
    })
    .collect()
}

fn default_activity_library() -> Vec<ActivityLibraryItem> {
    [
        ("Walking", 4.0, Intensity::Low),
        ("Yoga", 3.0, Intensity::Low),
        ("Cycling", 8.0, Intensity::Moderate),
        ("Swimming", 9.0, Intensity::Moderate),
        ("Running", 11.0, Intensity::High),
    ]
    .into_iter()
    .map(|(name, calories_per_minute, intensity)| ActivityLibraryItem {
        name: name.to_string(),
        calories_per_minute,
        intensity,
    })
    .collect()
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: Gender,
    pub age: f64,
    pub height_cm: f64,
    pub activity_factor: f64,
    pub goal_weight_kg: f64,
    pub goal_date: NaiveDate,
    pub current_weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub date: NaiveDate,
    #[serde(alias = "weight")]
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub date: NaiveDate,
    pub calories: f64,
    #[serde(default, alias = "protein")]
    pub protein_g: f64,
    #[serde(default, alias = "carbs")]
    pub carbs_g: f64,
    #[serde(default, alias = "fat")]
    pub fat_g: f64,
    /// What a composed meal was made of. Empty for single foods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MealComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealComponent {
    pub name: String,
    pub grams: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub date: NaiveDate,
    pub duration_min: f64,
    pub calories: f64,
}

/// Nutrition values for one portion of `portion_g` grams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodLibraryItem {
    pub name: String,
    pub calories: f64,
    #[serde(default, alias = "protein")]
    pub protein_g: f64,
    #[serde(default, alias = "carbs")]
    pub carbs_g: f64,
    #[serde(default, alias = "fat")]
    pub fat_g: f64,
    #[serde(default = "default_portion_g")]
    pub portion_g: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLibraryItem {
    pub name: String,
    pub calories_per_minute: f64,
    #[serde(default)]
    pub intensity: Intensity,
}

pub fn default_portion_g() -> f64 {
    100.0
}

/// The persisted document. Everything the tracker knows lives here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    #[serde(default)]
    pub food_library: Vec<FoodLibraryItem>,
    #[serde(default)]
    pub activity_library: Vec<ActivityLibraryItem>,
    #[serde(default)]
    pub next_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRequest {
    pub date: Option<NaiveDate>,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntryRequest {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntryRequest {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub duration_min: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub name: String,
    #[serde(default = "default_portion_g")]
    pub grams: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    #[serde(default)]
    pub name: String,
    pub date: Option<NaiveDate>,
    pub items: Vec<MealItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryActivityRequest {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub duration_min: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    pub bmr: f64,
    pub maintenance_calories: i64,
    pub target_calories: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub rate: f64,
    pub projected_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub rate: f64,
    pub projected_date: NaiveDate,
    pub meets_goal_date: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodTotals {
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTotals {
    pub total_calories: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaloriePoint {
    pub date: NaiveDate,
    pub consumed: f64,
    pub burned: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub date: NaiveDate,
    pub current_weight_kg: Option<f64>,
    pub food: FoodTotals,
    pub burned_calories: f64,
    pub net_calories: f64,
    pub metrics: Option<ProfileMetrics>,
    pub remaining_calories: Option<f64>,
    pub recent_foods: Vec<FoodEntry>,
    pub recent_weights: Vec<WeightEntry>,
}

use crate::errors::AppError;
use crate::history::{Dated, SortDirection, sort_by_date, weight_series};
use crate::metrics::compute_metrics;
use crate::models::{
    ActivityEntry, ActivityEntryRequest, ActivityLibraryItem, ActivityTotals, CaloriePoint,
    Dashboard, FoodEntry, FoodEntryRequest, FoodLibraryItem, FoodTotals, GoalProjection,
    LibraryActivityRequest, MealRequest, Profile, ProfileMetrics, WeightEntry, WeightRequest,
};
use crate::projection::{parse_rates, project_profile};
use crate::state::AppState;
use crate::stats::{activity_totals, build_dashboard_at, calorie_series_at, food_totals};
use crate::tracker;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub order: Option<SortDirection>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub rates: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let data = state.data.lock().await;
    let dashboard = build_dashboard_at(today(), &data)?;
    Ok(Html(render_index(&dashboard)))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_dashboard_at(today(), &data)?))
}

pub async fn get_calorie_chart(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaloriePoint>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(calorie_series_at(today(), &data)?))
}

pub async fn get_weight_chart(State(state): State<AppState>) -> Json<Vec<WeightEntry>> {
    let data = state.data.lock().await;
    Json(weight_series(&data.weights))
}

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    let data = state.data.lock().await;
    data.profile
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::not_found("no profile saved yet"))
}

pub async fn put_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    let saved = state
        .mutate(|data| tracker::save_profile(data, profile))
        .await?;
    info!("profile saved");
    Ok(Json(saved))
}

pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<ProfileMetrics>, AppError> {
    let data = state.data.lock().await;
    let profile = data
        .profile
        .as_ref()
        .ok_or_else(|| AppError::not_found("no profile saved yet"))?;
    Ok(Json(compute_metrics(profile)?))
}

pub async fn get_projection(
    State(state): State<AppState>,
    Query(query): Query<ProjectionQuery>,
) -> Result<Json<Vec<GoalProjection>>, AppError> {
    let rates = parse_rates(query.rates.as_deref())?;
    let data = state.data.lock().await;
    let profile = data
        .profile
        .as_ref()
        .ok_or_else(|| AppError::not_found("no profile saved yet"))?;
    Ok(Json(project_profile(profile, today(), &rates)?))
}

pub async fn list_weights(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<WeightEntry>> {
    let data = state.data.lock().await;
    Json(ordered(&data.weights, &query))
}

pub async fn save_weight(
    State(state): State<AppState>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<WeightEntry>, AppError> {
    let entry = WeightEntry {
        date: payload.date.unwrap_or_else(today),
        weight_kg: payload.weight_kg,
    };
    let saved = state
        .mutate(|data| tracker::upsert_weight(data, entry))
        .await?;
    info!("weight {} kg recorded for {}", saved.weight_kg, saved.date);
    Ok(Json(saved))
}

pub async fn delete_weight(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeightEntry>, AppError> {
    let removed = state
        .mutate(|data| tracker::delete_weight(data, date))
        .await?;
    Ok(Json(removed))
}

pub async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<FoodEntry>> {
    let data = state.data.lock().await;
    Json(ordered(&data.foods, &query))
}

pub async fn add_food(
    State(state): State<AppState>,
    Json(payload): Json<FoodEntryRequest>,
) -> Result<Json<FoodEntry>, AppError> {
    let entry = FoodEntry {
        id: 0,
        name: payload.name,
        date: payload.date.unwrap_or_else(today),
        calories: payload.calories,
        protein_g: payload.protein_g,
        carbs_g: payload.carbs_g,
        fat_g: payload.fat_g,
        items: Vec::new(),
    };
    let saved = state
        .mutate(|data| tracker::add_food_entry(data, entry))
        .await?;
    Ok(Json(saved))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<FoodEntry>, AppError> {
    let removed = state
        .mutate(|data| tracker::delete_food_entry(data, id))
        .await?;
    Ok(Json(removed))
}

pub async fn save_meal(
    State(state): State<AppState>,
    Json(payload): Json<MealRequest>,
) -> Result<Json<FoodEntry>, AppError> {
    let date = payload.date.unwrap_or_else(today);
    let meal = state
        .mutate(|data| tracker::compose_meal(data, &payload.name, date, &payload.items))
        .await?;
    info!("meal '{}' saved with {:.0} kcal", meal.name, meal.calories);
    Ok(Json(meal))
}

pub async fn get_food_totals(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<FoodTotals>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(food_totals(&data.foods, query.date.unwrap_or_else(today))?))
}

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<ActivityEntry>> {
    let data = state.data.lock().await;
    Json(ordered(&data.activities, &query))
}

pub async fn add_activity(
    State(state): State<AppState>,
    Json(payload): Json<ActivityEntryRequest>,
) -> Result<Json<ActivityEntry>, AppError> {
    let entry = ActivityEntry {
        id: 0,
        name: payload.name,
        date: payload.date.unwrap_or_else(today),
        duration_min: payload.duration_min,
        calories: payload.calories,
    };
    let saved = state
        .mutate(|data| tracker::add_activity_entry(data, entry))
        .await?;
    Ok(Json(saved))
}

pub async fn add_library_activity_entry(
    State(state): State<AppState>,
    Json(payload): Json<LibraryActivityRequest>,
) -> Result<Json<ActivityEntry>, AppError> {
    let date = payload.date.unwrap_or_else(today);
    let saved = state
        .mutate(|data| {
            tracker::activity_from_library(data, &payload.name, date, payload.duration_min)
        })
        .await?;
    Ok(Json(saved))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActivityEntry>, AppError> {
    let removed = state
        .mutate(|data| tracker::delete_activity_entry(data, id))
        .await?;
    Ok(Json(removed))
}

pub async fn get_activity_totals(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ActivityTotals>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(activity_totals(
        &data.activities,
        query.date.unwrap_or_else(today),
    )?))
}

pub async fn list_library_foods(State(state): State<AppState>) -> Json<Vec<FoodLibraryItem>> {
    let data = state.data.lock().await;
    Json(data.food_library.clone())
}

pub async fn add_library_food(
    State(state): State<AppState>,
    Json(item): Json<FoodLibraryItem>,
) -> Result<Json<FoodLibraryItem>, AppError> {
    let saved = state
        .mutate(|data| tracker::add_library_food(data, item))
        .await?;
    Ok(Json(saved))
}

pub async fn delete_library_food(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FoodLibraryItem>, AppError> {
    let removed = state
        .mutate(|data| tracker::delete_library_food(data, &name))
        .await?;
    Ok(Json(removed))
}

pub async fn search_library_foods(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<FoodLibraryItem>> {
    let data = state.data.lock().await;
    Json(
        tracker::search_food_library(&data, &query.q)
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn list_library_activities(
    State(state): State<AppState>,
) -> Json<Vec<ActivityLibraryItem>> {
    let data = state.data.lock().await;
    Json(data.activity_library.clone())
}

pub async fn add_library_activity(
    State(state): State<AppState>,
    Json(item): Json<ActivityLibraryItem>,
) -> Result<Json<ActivityLibraryItem>, AppError> {
    let saved = state
        .mutate(|data| tracker::add_library_activity(data, item))
        .await?;
    Ok(Json(saved))
}

pub async fn delete_library_activity(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ActivityLibraryItem>, AppError> {
    let removed = state
        .mutate(|data| tracker::delete_library_activity(data, &name))
        .await?;
    Ok(Json(removed))
}

fn ordered<T: Dated + Clone>(items: &[T], query: &HistoryQuery) -> Vec<T> {
    let mut sorted = sort_by_date(items, query.order.unwrap_or_default());
    if let Some(limit) = query.limit {
        sorted.truncate(limit);
    }
    sorted
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

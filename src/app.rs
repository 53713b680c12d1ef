use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/charts/calories", get(handlers::get_calorie_chart))
        .route("/api/charts/weight", get(handlers::get_weight_chart))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::put_profile),
        )
        .route("/api/profile/metrics", get(handlers::get_metrics))
        .route("/api/profile/projection", get(handlers::get_projection))
        .route(
            "/api/weights",
            get(handlers::list_weights).post(handlers::save_weight),
        )
        .route("/api/weights/:date", delete(handlers::delete_weight))
        .route(
            "/api/foods",
            get(handlers::list_foods).post(handlers::add_food),
        )
        .route("/api/foods/totals", get(handlers::get_food_totals))
        .route("/api/foods/:id", delete(handlers::delete_food))
        .route("/api/meals", post(handlers::save_meal))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::add_activity),
        )
        .route("/api/activities/totals", get(handlers::get_activity_totals))
        .route(
            "/api/activities/from-library",
            post(handlers::add_library_activity_entry),
        )
        .route("/api/activities/:id", delete(handlers::delete_activity))
        .route(
            "/api/library/foods",
            get(handlers::list_library_foods).post(handlers::add_library_food),
        )
        .route("/api/library/foods/search", get(handlers::search_library_foods))
        .route(
            "/api/library/foods/:name",
            delete(handlers::delete_library_food),
        )
        .route(
            "/api/library/activities",
            get(handlers::list_library_activities).post(handlers::add_library_activity),
        )
        .route(
            "/api/library/activities/:name",
            delete(handlers::delete_library_activity),
        )
        .with_state(state)
}

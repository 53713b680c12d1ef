pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use errors::{AppError, TrackerError};
pub use state::AppState;
pub use storage::load_data;

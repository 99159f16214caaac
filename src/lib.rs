pub mod app;
pub mod classify;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod window;

pub use app::router;
pub use classify::ReportContext;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use window::{BucketMap, DateWindow};

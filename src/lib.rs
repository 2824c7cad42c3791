pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use db::ScanStore;
use services::engine::Engine;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub store: Arc<dyn ScanStore>,
    pub config: config::AppConfig,
}

//! Route definitions for the fraudscan API.

pub mod health;
pub mod patterns;
pub mod reports;
pub mod scans;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/scan/{channel}", post(scans::scan))
        .route("/scans", get(scans::recent))
        .route("/scans/{id}", get(scans::get_by_id))
        .route("/classify", post(scans::classify))
        .route("/reports", get(reports::recent).post(reports::create))
        .route("/patterns", get(patterns::list).post(patterns::create));

    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

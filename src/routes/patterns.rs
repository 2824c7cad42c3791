//! Pattern registry routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::RequireAdmin;
use crate::middleware::extract::{AppJson, AppQuery};
use crate::models::pattern::{CreateScamPattern, PatternFilter, ScamPattern};
use crate::AppState;

/// GET /api/v1/patterns: registry rules, optionally filtered by category.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<PatternFilter>,
) -> Result<Json<ApiResponse<Vec<ScamPattern>>>, AppError> {
    let patterns = state.engine.registry_patterns(filter.category)?;
    Ok(ApiResponse::success(patterns))
}

/// POST /api/v1/patterns: append a rule (admin token required).
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppJson(body): AppJson<CreateScamPattern>,
) -> Result<Json<ApiResponse<ScamPattern>>, AppError> {
    let pattern = state.engine.registry().add_pattern(body)?;
    Ok(ApiResponse::success(pattern))
}

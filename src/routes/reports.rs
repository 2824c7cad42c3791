//! Community report routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::client_ip::ClientIp;
use crate::middleware::extract::{AppJson, AppQuery};
use crate::models::scan::{RecentQuery, Report, SubmitReport};
use crate::services::scan as scan_service;
use crate::AppState;

/// POST /api/v1/reports: submit a community report.
pub async fn create(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    AppJson(body): AppJson<SubmitReport>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let report = scan_service::submit_report(state.store.as_ref(), body, ip).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/v1/reports: most recent reports first.
pub async fn recent(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<Report>>>, AppError> {
    let limit = query.limit_or(state.config.recent_limit_default);
    let reports = state.store.recent_reports(limit).await?;
    Ok(ApiResponse::success(reports))
}

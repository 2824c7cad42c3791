//! Scan routes: per-channel analysis, scan history, and reclassification.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::client_ip::ClientIp;
use crate::middleware::extract::{AppJson, AppPath, AppQuery};
use crate::models::scan::{Channel, RecentQuery, Scan, Verdict};
use crate::services::risk_score;
use crate::services::scan::{self as scan_service, ScanOutcome};
use crate::AppState;

/// Body for a scan request. `secondary_content` carries APK extracted strings.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub content: String,
    pub secondary_content: Option<String>,
}

/// POST /api/v1/scan/{channel}: analyze content and record the scan.
pub async fn scan(
    State(state): State<AppState>,
    AppPath(channel): AppPath<Channel>,
    ClientIp(ip): ClientIp,
    AppJson(body): AppJson<ScanRequest>,
) -> Result<Json<ApiResponse<ScanOutcome>>, AppError> {
    let outcome = scan_service::run(
        &state.engine,
        state.store.as_ref(),
        channel,
        &body.content,
        body.secondary_content.as_deref(),
        ip,
    )
    .await?;
    Ok(ApiResponse::success(outcome))
}

/// GET /api/v1/scans: most recent scans first.
pub async fn recent(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<Scan>>>, AppError> {
    let limit = query.limit_or(state.config.recent_limit_default);
    let scans = state.store.recent_scans(limit).await?;
    Ok(ApiResponse::success(scans))
}

/// GET /api/v1/scans/{id}: a single stored scan.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Scan>>, AppError> {
    let scan = state
        .store
        .get_scan(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Scan {id} not found")))?;
    Ok(ApiResponse::success(scan))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub confidence: i64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub confidence: i64,
    pub verdict: Verdict,
}

/// POST /api/v1/classify: verdict for an externally blended confidence.
pub async fn classify(
    AppJson(body): AppJson<ClassifyRequest>,
) -> Result<Json<ApiResponse<ClassifyResponse>>, AppError> {
    let verdict = risk_score::classify_confidence(body.confidence)?;
    Ok(ApiResponse::success(ClassifyResponse {
        confidence: body.confidence,
        verdict,
    }))
}

//! Scan record assembly and the single write path into the store.

use serde::Serialize;

use crate::db::ScanStore;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::scan::{Channel, CreateReport, CreateScan, Report, Scan, SubmitReport};
use crate::services::engine::Engine;
use crate::services::{fingerprint, risk_score};

/// Scan as returned to callers: the stored record plus community context.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    #[serde(flatten)]
    pub scan: Scan,
    pub community_reports: i64,
}

/// Combine analyzer output with the submission into a storable record.
pub fn build_record(
    channel: Channel,
    content: &str,
    analysis: AnalysisResult,
    ip_address: Option<String>,
) -> CreateScan {
    CreateScan {
        scan_type: channel,
        content: content.to_string(),
        verdict: risk_score::classify(analysis.confidence),
        confidence: analysis.confidence,
        risk_factors: analysis.risk_factors,
        ip_address,
        fingerprint: fingerprint::compute(channel, content),
    }
}

/// Analyze, persist, and return the stored scan.
pub async fn run(
    engine: &Engine,
    store: &dyn ScanStore,
    channel: Channel,
    content: &str,
    secondary: Option<&str>,
    ip_address: Option<String>,
) -> Result<ScanOutcome, AppError> {
    let analysis = engine.try_analyze(channel, content, secondary)?;
    let record = build_record(channel, content, analysis, ip_address);
    let fingerprint = record.fingerprint.clone();

    let scan = store.create_scan(record).await?;
    let community_reports = store.count_reports_by_fingerprint(&fingerprint).await?;

    tracing::info!(
        scan_id = scan.id,
        channel = %channel,
        verdict = %scan.verdict,
        confidence = scan.confidence,
        "Scan recorded"
    );

    Ok(ScanOutcome {
        scan,
        community_reports,
    })
}

/// Persist a user-submitted report.
pub async fn submit_report(
    store: &dyn ScanStore,
    body: SubmitReport,
    ip_address: Option<String>,
) -> Result<Report, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }
    if body.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }

    let fingerprint = fingerprint::compute(body.report_type, &body.content);
    let report = store
        .create_report(CreateReport {
            report_type: body.report_type,
            content: body.content,
            description: body.description,
            ip_address,
            fingerprint,
        })
        .await?;

    tracing::info!(report_id = report.id, report_type = %report.report_type, "Report submitted");
    Ok(report)
}

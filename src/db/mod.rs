//! Scan and report persistence.
//!
//! The engine never touches storage; routes and the scan service write
//! through [`ScanStore`], backed by PostgreSQL or an in-memory map.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::scan::{CreateReport, CreateScan, Report, Scan};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Append-only store for scans and community reports.
///
/// Ids are unique and increase monotonically; listings are most-recent-first.
#[async_trait]
pub trait ScanStore: Send + Sync {
    /// Short name of the backend for health output.
    fn backend(&self) -> &'static str;

    async fn create_scan(&self, input: CreateScan) -> Result<Scan, AppError>;

    async fn get_scan(&self, id: i64) -> Result<Option<Scan>, AppError>;

    async fn recent_scans(&self, limit: i64) -> Result<Vec<Scan>, AppError>;

    async fn create_report(&self, input: CreateReport) -> Result<Report, AppError>;

    async fn recent_reports(&self, limit: i64) -> Result<Vec<Report>, AppError>;

    async fn count_reports_by_fingerprint(&self, fingerprint: &str) -> Result<i64, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::ScanStore;
use crate::errors::AppError;
use crate::models::scan::{CreateReport, CreateScan, Report, Scan};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply embedded migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = super::create_pool(database_url, max_connections).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("Migration failed: {e}")))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ScanStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_scan(&self, input: CreateScan) -> Result<Scan, AppError> {
        let scan = sqlx::query_as::<_, Scan>(
            r#"
            INSERT INTO scans (scan_type, content, verdict, confidence, risk_factors, ip_address, fingerprint)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.scan_type)
        .bind(&input.content)
        .bind(input.verdict)
        .bind(i32::from(input.confidence))
        .bind(Json(&input.risk_factors))
        .bind(&input.ip_address)
        .bind(&input.fingerprint)
        .fetch_one(&self.pool)
        .await?;
        Ok(scan)
    }

    async fn get_scan(&self, id: i64) -> Result<Option<Scan>, AppError> {
        let scan = sqlx::query_as::<_, Scan>("SELECT * FROM scans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(scan)
    }

    async fn recent_scans(&self, limit: i64) -> Result<Vec<Scan>, AppError> {
        let scans = sqlx::query_as::<_, Scan>("SELECT * FROM scans ORDER BY id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(scans)
    }

    async fn create_report(&self, input: CreateReport) -> Result<Report, AppError> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (report_type, content, description, ip_address, fingerprint)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.report_type)
        .bind(&input.content)
        .bind(&input.description)
        .bind(&input.ip_address)
        .bind(&input.fingerprint)
        .fetch_one(&self.pool)
        .await?;
        Ok(report)
    }

    async fn recent_reports(&self, limit: i64) -> Result<Vec<Report>, AppError> {
        let reports =
            sqlx::query_as::<_, Report>("SELECT * FROM reports ORDER BY id DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(reports)
    }

    async fn count_reports_by_fingerprint(&self, fingerprint: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE fingerprint = $1")
            .bind(fingerprint)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

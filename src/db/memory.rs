//! In-memory store used when no database is configured.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use super::ScanStore;
use crate::errors::AppError;
use crate::models::scan::{CreateReport, CreateScan, Report, Scan};

#[derive(Debug, Default)]
struct Tables {
    scans: BTreeMap<i64, Scan>,
    reports: BTreeMap<i64, Report>,
    next_scan_id: i64,
    next_report_id: i64,
}

/// Mutex-guarded ordered maps keyed by monotonically assigned ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

fn take_limit<'a, T: Clone + 'a>(
    rows: impl DoubleEndedIterator<Item = &'a T>,
    limit: i64,
) -> Vec<T> {
    let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    rows.rev().take(limit).cloned().collect()
}

#[async_trait]
impl ScanStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_scan(&self, input: CreateScan) -> Result<Scan, AppError> {
        let mut tables = self.lock()?;
        tables.next_scan_id += 1;
        let scan = Scan {
            id: tables.next_scan_id,
            scan_type: input.scan_type,
            content: input.content,
            verdict: input.verdict,
            confidence: i32::from(input.confidence),
            risk_factors: Json(input.risk_factors),
            ip_address: input.ip_address,
            fingerprint: input.fingerprint,
            timestamp: Utc::now(),
        };
        tables.scans.insert(scan.id, scan.clone());
        Ok(scan)
    }

    async fn get_scan(&self, id: i64) -> Result<Option<Scan>, AppError> {
        Ok(self.lock()?.scans.get(&id).cloned())
    }

    async fn recent_scans(&self, limit: i64) -> Result<Vec<Scan>, AppError> {
        Ok(take_limit(self.lock()?.scans.values(), limit))
    }

    async fn create_report(&self, input: CreateReport) -> Result<Report, AppError> {
        let mut tables = self.lock()?;
        tables.next_report_id += 1;
        let report = Report {
            id: tables.next_report_id,
            report_type: input.report_type,
            content: input.content,
            description: input.description,
            verified: false,
            ip_address: input.ip_address,
            fingerprint: input.fingerprint,
            timestamp: Utc::now(),
        };
        tables.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn recent_reports(&self, limit: i64) -> Result<Vec<Report>, AppError> {
        Ok(take_limit(self.lock()?.reports.values(), limit))
    }

    async fn count_reports_by_fingerprint(&self, fingerprint: &str) -> Result<i64, AppError> {
        let count = self
            .lock()?
            .reports
            .values()
            .filter(|r| r.fingerprint == fingerprint)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan::{Channel, Verdict};
    use std::sync::Arc;

    fn scan_input(content: &str) -> CreateScan {
        CreateScan {
            scan_type: Channel::Sms,
            content: content.to_string(),
            verdict: Verdict::Safe,
            confidence: 10,
            risk_factors: Vec::new(),
            ip_address: None,
            fingerprint: format!("fp-{content}"),
        }
    }

    #[tokio::test]
    async fn ids_increase_and_recent_is_newest_first() {
        let store = MemoryStore::new();
        for content in ["one", "two", "three"] {
            store.create_scan(scan_input(content)).await.unwrap();
        }

        let recent = store.recent_scans(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 3);
        assert_eq!(recent[0].content, "three");
        assert_eq!(recent[1].id, 2);
    }

    #[tokio::test]
    async fn get_scan_by_id() {
        let store = MemoryStore::new();
        let created = store.create_scan(scan_input("hello")).await.unwrap();
        let fetched = store.get_scan(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, "hello");
        assert!(store.get_scan(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reports_default_unverified_and_count_by_fingerprint() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            store
                .create_report(CreateReport {
                    report_type: Channel::Phone,
                    content: "9000000000".to_string(),
                    description: "Caller asked for OTP".to_string(),
                    ip_address: Some("127.0.0.1".to_string()),
                    fingerprint: "abc".to_string(),
                })
                .await
                .unwrap();
        }

        let reports = store.recent_reports(10).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| !r.verified));
        assert_eq!(store.count_reports_by_fingerprint("abc").await.unwrap(), 2);
        assert_eq!(store.count_reports_by_fingerprint("zzz").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_unique_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_scan(scan_input(&i.to_string())).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    }
}

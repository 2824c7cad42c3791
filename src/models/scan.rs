//! Scan and community report records, plus the enums shared with the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// -- Enums matching PostgreSQL --

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "scan_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Url,
    Sms,
    Qr,
    Apk,
    Call,
    Phone,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Sms => "sms",
            Self::Qr => "qr",
            Self::Apk => "apk",
            Self::Call => "call",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "verdict", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Suspicious,
    Dangerous,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Suspicious => write!(f, "suspicious"),
            Self::Dangerous => write!(f, "dangerous"),
        }
    }
}

// -- Scan --

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Scan {
    pub id: i64,
    #[serde(rename = "type")]
    pub scan_type: Channel,
    pub content: String,
    pub verdict: Verdict,
    pub confidence: i32,
    pub risk_factors: Json<Vec<String>>,
    pub ip_address: Option<String>,
    pub fingerprint: String,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

/// Everything the store needs to persist a scan; `id` and `timestamp` are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateScan {
    pub scan_type: Channel,
    pub content: String,
    pub verdict: Verdict,
    pub confidence: u8,
    pub risk_factors: Vec<String>,
    pub ip_address: Option<String>,
    pub fingerprint: String,
}

// -- Community report --

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "type")]
    pub report_type: Channel,
    pub content: String,
    pub description: String,
    pub verified: bool,
    pub ip_address: Option<String>,
    pub fingerprint: String,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

/// Report body as submitted by a user.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReport {
    #[serde(rename = "type")]
    pub report_type: Channel,
    pub content: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReport {
    pub report_type: Channel,
    pub content: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub fingerprint: String,
}

/// `?limit=` query for most-recent-first listings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

impl RecentQuery {
    const MAX_LIMIT: i64 = 100;

    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, Self::MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Channel::Apk).unwrap(), "apk");
        let parsed: Channel = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(parsed, Channel::Phone);
    }

    #[test]
    fn unknown_channel_rejected() {
        assert!(serde_json::from_str::<Channel>("\"email\"").is_err());
    }

    #[test]
    fn scan_serializes_type_field() {
        let scan = Scan {
            id: 7,
            scan_type: Channel::Url,
            content: "http://bit.ly/x".to_string(),
            verdict: Verdict::Suspicious,
            confidence: 67,
            risk_factors: Json(vec!["Suspicious domain: \"bit.ly\"".to_string()]),
            ip_address: None,
            fingerprint: "abc".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&scan).unwrap();
        assert_eq!(json["type"], "url");
        assert_eq!(json["verdict"], "suspicious");
        assert_eq!(json["risk_factors"][0], "Suspicious domain: \"bit.ly\"");
    }

    #[test]
    fn recent_query_clamps_limit() {
        assert_eq!(RecentQuery { limit: None }.limit_or(20), 20);
        assert_eq!(RecentQuery { limit: Some(0) }.limit_or(20), 1);
        assert_eq!(RecentQuery { limit: Some(5000) }.limit_or(20), 100);
    }
}

//! Analyzer output and threat-intelligence shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of one analyzer invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub risk_factors: Vec<String>,
    /// Always within 0-100.
    pub confidence: u8,
}

/// What a threat source knows about a phone number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatAnalysis {
    pub report_count: u32,
    pub category: String,
    pub last_seen: DateTime<Utc>,
    pub source: String,
}

/// Entry in the static known-scammer table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnownScammer {
    pub number: String,
    pub report_count: u32,
    pub category: String,
    pub last_seen: DateTime<Utc>,
}

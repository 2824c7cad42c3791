//! Scam pattern model for the configurable detection rule registry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Loan,
    Rummy,
    Phishing,
    Upi,
    Lottery,
    Kyc,
    Investment,
    Impersonation,
    Job,
}

/// A registered detection rule. Values handed out by the registry are owned copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScamPattern {
    pub id: i64,
    pub category: PatternCategory,
    /// Literal substring or regular expression, matched case-insensitively.
    pub pattern: String,
    /// Reserved for weighted scoring; not consumed by the tier scorer.
    pub weight: i32,
    pub description: Option<String>,
}

impl ScamPattern {
    /// Risk factor text emitted when this rule fires.
    pub fn factor_text(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.pattern)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScamPattern {
    pub category: PatternCategory,
    pub pattern: String,
    pub weight: Option<i32>,
    pub description: Option<String>,
}

/// `?category=` filter for pattern listings.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternFilter {
    pub category: Option<PatternCategory>,
}

//! Keyword lists consulted by the channel analyzers.
//!
//! Lists are plain data keyed by name so they can be extended from a
//! detection-rules file without touching analyzer code.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::analysis::KnownScammer;

pub const SUSPICIOUS_TLDS: &str = "suspicious_tlds";
pub const URL_SHORTENERS: &str = "url_shorteners";
pub const URGENCY_WORDS: &str = "urgency_words";
pub const SCAM_PHRASES: &str = "scam_phrases";
pub const AUTHORITY_NAMES: &str = "authority_names";
pub const SENSITIVE_REQUESTS: &str = "sensitive_requests";
pub const THREAT_WORDS: &str = "threat_words";
pub const LOAN_INDICATORS: &str = "loan_indicators";
pub const GAMING_INDICATORS: &str = "gaming_indicators";
pub const PREMIUM_PREFIXES: &str = "premium_prefixes";

const DEFAULT_LISTS: &[(&str, &[&str])] = &[
    (SUSPICIOUS_TLDS, &[".tk", ".ml", ".ga", ".cf"]),
    (URL_SHORTENERS, &["bit.ly", "tinyurl.com"]),
    (
        URGENCY_WORDS,
        &["urgent", "immediate", "expire", "block", "suspend", "limited time"],
    ),
    (
        SCAM_PHRASES,
        &["click here", "verify now", "claim prize", "congratulations"],
    ),
    (
        AUTHORITY_NAMES,
        &["rbi", "bank", "police", "income tax", "customs"],
    ),
    (
        SENSITIVE_REQUESTS,
        &["otp", "pin", "password", "cvv", "card number"],
    ),
    (THREAT_WORDS, &["block account", "legal action", "arrest", "fine"]),
    (LOAN_INDICATORS, &["instant", "quick", "easy", "approved"]),
    (GAMING_INDICATORS, &["win", "cash", "earn", "daily"]),
    (PREMIUM_PREFIXES, &["900", "905"]),
];

/// Named keyword lists, lowercased on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordLists(BTreeMap<String, Vec<String>>);

impl KeywordLists {
    pub fn new(lists: BTreeMap<String, Vec<String>>) -> Self {
        let lists = lists
            .into_iter()
            .map(|(key, words)| {
                let words = words
                    .into_iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (key, words)
            })
            .collect();
        Self(lists)
    }

    /// Words under `key`, or an empty slice if the list is not configured.
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace whole lists by key; keys not mentioned keep their current words.
    pub fn with_overrides(self, overrides: BTreeMap<String, Vec<String>>) -> Self {
        let mut merged = self.0;
        merged.extend(overrides);
        Self::new(merged)
    }
}

impl Default for KeywordLists {
    fn default() -> Self {
        let lists = DEFAULT_LISTS
            .iter()
            .map(|(key, words)| {
                (
                    key.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self::new(lists)
    }
}

/// On-disk shape of a detection-rules file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
struct DetectionRulesFile {
    #[serde(default)]
    keywords: BTreeMap<String, Vec<String>>,
    known_scammers: Option<Vec<KnownScammer>>,
}

/// Keyword lists plus the static known-scammer table.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub keywords: KeywordLists,
    pub known_scammers: Vec<KnownScammer>,
}

impl DetectionConfig {
    /// Load overrides from a JSON file on top of the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        let file: DetectionRulesFile = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            keyword_overrides = file.keywords.len(),
            custom_scammers = file.known_scammers.is_some(),
            "Loaded detection rules"
        );

        Ok(Self {
            keywords: KeywordLists::default().with_overrides(file.keywords),
            known_scammers: file.known_scammers.unwrap_or_else(default_known_scammers),
        })
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordLists::default(),
            known_scammers: default_known_scammers(),
        }
    }
}

fn default_known_scammers() -> Vec<KnownScammer> {
    let seen = |y, m, d| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .unwrap_or_default()
    };
    vec![
        KnownScammer {
            number: "+91 98765 43210".to_string(),
            report_count: 47,
            category: "KYC update fraud".to_string(),
            last_seen: seen(2026, 9, 28),
        },
        KnownScammer {
            number: "+91 80000 12345".to_string(),
            report_count: 156,
            category: "Instant loan harassment".to_string(),
            last_seen: seen(2026, 10, 2),
        },
        KnownScammer {
            number: "+91 70000 55555".to_string(),
            report_count: 23,
            category: "Fake customs parcel".to_string(),
            last_seen: seen(2026, 8, 14),
        },
    ]
}

//! Phone-number threat lookups.
//!
//! External intelligence feeds plug in through [`ThreatLookup`]. The static
//! known-scammer table implements the same trait and is always consulted as
//! the fallback.

use std::collections::HashMap;

use crate::models::analysis::{KnownScammer, ThreatAnalysis};

/// A source of per-number threat data.
pub trait ThreatLookup: Send + Sync {
    /// Name reported in [`ThreatAnalysis::source`].
    fn source(&self) -> &str;

    /// Look up a phone number, either digit-only or as typed.
    fn lookup(&self, phone_number: &str) -> Option<ThreatAnalysis>;
}

/// Static table of numbers with community scam reports.
#[derive(Debug, Clone, Default)]
pub struct ScammerTable {
    by_number: HashMap<String, KnownScammer>,
}

impl ScammerTable {
    /// Index every entry under both its trimmed form and its digits.
    pub fn new(entries: Vec<KnownScammer>) -> Self {
        let mut by_number = HashMap::new();
        for entry in entries {
            let digits: String = entry.number.chars().filter(char::is_ascii_digit).collect();
            if !digits.is_empty() {
                by_number.insert(digits, entry.clone());
            }
            by_number.insert(entry.number.trim().to_lowercase(), entry);
        }
        Self { by_number }
    }
}

impl ThreatLookup for ScammerTable {
    fn source(&self) -> &str {
        "community_reports"
    }

    fn lookup(&self, phone_number: &str) -> Option<ThreatAnalysis> {
        self.by_number
            .get(phone_number)
            .map(|entry| ThreatAnalysis {
                report_count: entry.report_count,
                category: entry.category.clone(),
                last_seen: entry.last_seen,
                source: self.source().to_string(),
            })
    }
}

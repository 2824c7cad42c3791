//! APK metadata checks over the app name and strings extracted from the package.

use super::first_match;
use crate::services::keywords::{GAMING_INDICATORS, KeywordLists, LOAN_INDICATORS};

/// `app_name` and `extracted_strings` must already be lowercased.
pub fn check(app_name: &str, extracted_strings: &str, lists: &KeywordLists) -> Vec<String> {
    let mut factors = Vec::new();
    let combined = format!("{app_name} {extracted_strings}");

    if combined.contains("loan") {
        if let Some(word) = first_match(&combined, lists.get(LOAN_INDICATORS)) {
            factors.push(format!("Predatory loan app indicator: \"{word}\""));
        }
    }

    if combined.contains("rummy") || combined.contains("game") {
        if let Some(word) = first_match(&combined, lists.get(GAMING_INDICATORS)) {
            factors.push(format!("Real-money gaming indicator: \"{word}\""));
        }
    }

    if extracted_strings.contains("contact") && extracted_strings.contains("sms") {
        factors.push("Requests excessive permissions (contacts and SMS access)".to_string());
    }

    factors
}

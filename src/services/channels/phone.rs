//! Phone number checks: known-scammer lookups first, prefix heuristics otherwise.

use crate::models::analysis::ThreatAnalysis;
use crate::services::keywords::{KeywordLists, PREMIUM_PREFIXES};
use crate::services::risk_score::MAX_CONFIDENCE;
use crate::services::threat_intel::ThreatLookup;

const KNOWN_SCAMMER_BASE: u32 = 85;
const HOME_COUNTRY_CODE: &str = "91";

/// Outcome of checking a phone number.
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneFindings {
    /// A threat source knows this number; confidence is fixed by its history.
    Known {
        risk_factors: Vec<String>,
        confidence: u8,
    },
    /// Not on record; factors from number-shape heuristics.
    Heuristic(Vec<String>),
}

/// `number` is the trimmed, lowercased input. Sources are asked in order.
pub fn check(number: &str, sources: &[&dyn ThreatLookup], lists: &KeywordLists) -> PhoneFindings {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    let candidates = [digits.as_str(), number];
    let hit = sources.iter().find_map(|source| {
        candidates
            .iter()
            .filter(|c| !c.is_empty())
            .find_map(|c| source.lookup(c))
    });

    if let Some(threat) = hit {
        return known(&threat);
    }

    PhoneFindings::Heuristic(heuristics(number, &digits, lists))
}

fn known(threat: &ThreatAnalysis) -> PhoneFindings {
    let risk_factors = vec![
        format!("Reported as scam {} times", threat.report_count),
        format!("Scam category: {}", threat.category),
        format!("Last reported: {}", threat.last_seen.format("%Y-%m-%d")),
    ];
    let confidence = KNOWN_SCAMMER_BASE
        .saturating_add(threat.report_count / 10)
        .min(u32::from(MAX_CONFIDENCE));

    PhoneFindings::Known {
        risk_factors,
        confidence: u8::try_from(confidence).unwrap_or(MAX_CONFIDENCE),
    }
}

fn heuristics(number: &str, digits: &str, lists: &KeywordLists) -> Vec<String> {
    let mut factors = Vec::new();
    if digits.is_empty() {
        return factors;
    }

    let national = national_part(digits);
    if let Some(prefix) = lists
        .get(PREMIUM_PREFIXES)
        .iter()
        .find(|p| national.starts_with(p.as_str()))
    {
        factors.push(format!("Premium-rate number prefix ({prefix})"));
    }

    let international = if let Some(rest) = number.strip_prefix('+') {
        !rest.trim_start().starts_with(HOME_COUNTRY_CODE)
    } else {
        number.starts_with("00") && !digits[2..].starts_with(HOME_COUNTRY_CODE)
    };

    if international {
        factors.push("Likely VOIP or international number (foreign country code)".to_string());
    } else if digits.len() < 10 || digits.len() > 12 {
        factors.push(format!(
            "Likely VOIP or international number (unusual length: {} digits)",
            digits.len()
        ));
    }

    factors
}

/// Strip a leading home country code or trunk zero.
fn national_part(digits: &str) -> &str {
    if digits.len() == 12 && digits.starts_with(HOME_COUNTRY_CODE) {
        &digits[2..]
    } else if digits.len() == 11 && digits.starts_with('0') {
        &digits[1..]
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::KnownScammer;
    use crate::services::threat_intel::ScammerTable;
    use chrono::Utc;

    fn table(reports: u32) -> ScammerTable {
        ScammerTable::new(vec![KnownScammer {
            number: "+91 98765 43210".to_string(),
            report_count: reports,
            category: "KYC update fraud".to_string(),
            last_seen: Utc::now(),
        }])
    }

    fn heuristic(number: &str) -> Vec<String> {
        let lists = KeywordLists::default();
        match check(number, &[], &lists) {
            PhoneFindings::Heuristic(f) => f,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn known_number_in_any_format() {
        let table = table(47);
        let lists = KeywordLists::default();
        for number in ["+91 98765 43210", "919876543210", "+91-98765-43210"] {
            match check(number, &[&table], &lists) {
                PhoneFindings::Known {
                    risk_factors,
                    confidence,
                } => {
                    assert_eq!(confidence, 89);
                    assert_eq!(risk_factors[0], "Reported as scam 47 times");
                    assert_eq!(risk_factors[1], "Scam category: KYC update fraud");
                }
                other => panic!("{number}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn report_count_never_saturates_past_cap() {
        let lists = KeywordLists::default();
        let table = table(5_000);
        match check("919876543210", &[&table], &lists) {
            PhoneFindings::Known { confidence, .. } => assert_eq!(confidence, 95),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ordinary_mobile_is_clean() {
        assert!(heuristic("9812345678").is_empty());
        assert!(heuristic("+91 98123 45678").is_empty());
    }

    #[test]
    fn premium_prefix() {
        assert_eq!(
            heuristic("9051234567"),
            vec!["Premium-rate number prefix (905)".to_string()]
        );
    }

    #[test]
    fn foreign_country_code() {
        let factors = heuristic("+44 20 7946 0958");
        assert_eq!(
            factors,
            vec!["Likely VOIP or international number (foreign country code)".to_string()]
        );
    }

    #[test]
    fn premium_and_unusual_length() {
        let factors = heuristic("900123");
        assert_eq!(factors.len(), 2);
        assert_eq!(
            factors[1],
            "Likely VOIP or international number (unusual length: 6 digits)"
        );
    }

    #[test]
    fn no_digits_no_factors() {
        assert!(heuristic("call me").is_empty());
    }
}

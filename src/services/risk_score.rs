//! Confidence scoring from risk factors, and the verdict classifier.
//!
//! Tiers by factor count (fixed values, no jitter):
//! - 0 factors: 10
//! - 1 factor: 45
//! - 2 factors: 67
//! - 3+ factors: 87
//!
//! Severity bonuses are added once per group when the lowercased factor text
//! mentions a high-severity phrase, then the result is clamped to 5-95.

use crate::errors::EngineError;
use crate::models::scan::Verdict;

pub const MIN_CONFIDENCE: u8 = 5;
pub const MAX_CONFIDENCE: u8 = 95;
pub const BASELINE_CONFIDENCE: u8 = 10;

pub const DANGEROUS_THRESHOLD: u8 = 70;
pub const SUSPICIOUS_THRESHOLD: u8 = 40;

/// Phrase groups and the bonus each group adds.
const SEVERITY_BONUSES: &[(&[&str], u8)] = &[
    (&["instant loan", "guaranteed win"], 10),
    (&["rbi", "bank security"], 15),
    (&["upi pin", "otp"], 12),
];

/// Compute confidence for a list of risk factors.
///
/// Adding a factor never lowers the result: the tier value grows with the
/// count, and factors are joined with newlines so a bonus phrase can only
/// come from a single factor.
pub fn score<S: AsRef<str>>(risk_factors: &[S]) -> u8 {
    let base = tier_value(risk_factors.len());

    let text = risk_factors
        .iter()
        .map(|f| f.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    let bonus: u8 = SEVERITY_BONUSES
        .iter()
        .filter(|(phrases, _)| phrases.iter().any(|p| text.contains(p)))
        .map(|(_, bonus)| *bonus)
        .sum();

    base.saturating_add(bonus).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn tier_value(factor_count: usize) -> u8 {
    match factor_count {
        0 => BASELINE_CONFIDENCE,
        1 => 45,
        2 => 67,
        _ => 87,
    }
}

/// Map confidence to a verdict.
pub fn classify(confidence: u8) -> Verdict {
    debug_assert!(confidence <= 100, "confidence out of range: {confidence}");
    if confidence >= DANGEROUS_THRESHOLD {
        Verdict::Dangerous
    } else if confidence >= SUSPICIOUS_THRESHOLD {
        Verdict::Suspicious
    } else {
        Verdict::Safe
    }
}

/// Classify an externally supplied score, e.g. a blend of several analyzers.
pub fn classify_confidence(confidence: i64) -> Result<Verdict, EngineError> {
    match u8::try_from(confidence) {
        Ok(c) if c <= 100 => Ok(classify(c)),
        _ => Err(EngineError::ClassificationImpossible(confidence)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zero_factors_is_baseline() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(score(&empty), BASELINE_CONFIDENCE);
        assert_eq!(classify(score(&empty)), Verdict::Safe);
    }

    #[test]
    fn tier_values_by_count() {
        assert_eq!(score(&factors(&["a"])), 45);
        assert_eq!(score(&factors(&["a", "b"])), 67);
        assert_eq!(score(&factors(&["a", "b", "c"])), 87);
        assert_eq!(score(&factors(&["a", "b", "c", "d", "e"])), 87);
    }

    #[test]
    fn bonuses_apply_once_per_group() {
        // 67 + 15 (rbi) + 12 (otp) = 94
        let f = factors(&[
            "Authority impersonation: \"rbi\"",
            "Requests sensitive info: \"otp\"",
        ]);
        assert_eq!(score(&f), 94);

        // Both phrases of one group still add a single bonus
        let f = factors(&["Instant loan offer", "Guaranteed win promise"]);
        assert_eq!(score(&f), 77);
    }

    #[test]
    fn clamped_to_max() {
        let f = factors(&["instant loan", "rbi", "otp", "upi pin"]);
        assert_eq!(score(&f), MAX_CONFIDENCE);
    }

    #[test]
    fn bonus_phrase_cannot_span_factors() {
        let split = factors(&["instant", "loan"]);
        assert_eq!(score(&split), 67);
    }

    #[test]
    fn bounded_for_any_count() {
        for n in 0..12 {
            let f: Vec<String> = (0..n).map(|i| format!("otp rbi instant loan {i}")).collect();
            let s = score(&f);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&s), "n={n} s={s}");
        }
    }

    #[test]
    fn adding_a_factor_never_lowers_score() {
        let pool = [
            "Suspicious domain: \".tk\"",
            "Not using secure HTTPS connection",
            "Requests sensitive info: \"otp\"",
            "Bank security team impersonation",
            "Instant loan offer",
            "Scam phrase: \"click here\"",
            "Mentions money amount",
        ];
        let mut list: Vec<String> = Vec::new();
        for item in pool {
            let before = score(&list);
            list.push(item.to_string());
            assert!(score(&list) >= before, "{list:?}");
        }
    }

    #[test]
    fn verdict_boundaries() {
        assert_eq!(classify(0), Verdict::Safe);
        assert_eq!(classify(39), Verdict::Safe);
        assert_eq!(classify(40), Verdict::Suspicious);
        assert_eq!(classify(69), Verdict::Suspicious);
        assert_eq!(classify(70), Verdict::Dangerous);
        assert_eq!(classify(100), Verdict::Dangerous);
    }

    #[test]
    fn verdict_ranges_partition() {
        let mut counts = [0u32; 3];
        for c in 0..=100u8 {
            match classify(c) {
                Verdict::Safe => counts[0] += 1,
                Verdict::Suspicious => counts[1] += 1,
                Verdict::Dangerous => counts[2] += 1,
            }
        }
        assert_eq!(counts, [40, 30, 31]);
    }

    #[test]
    fn classify_confidence_rejects_out_of_range() {
        assert_eq!(classify_confidence(55).unwrap(), Verdict::Suspicious);
        assert!(matches!(
            classify_confidence(101),
            Err(EngineError::ClassificationImpossible(101))
        ));
        assert!(matches!(
            classify_confidence(-1),
            Err(EngineError::ClassificationImpossible(-1))
        ));
    }
}

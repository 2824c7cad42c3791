//! Process-wide registry of scam detection rules.
//!
//! Rules are compiled once on insertion and published as an immutable
//! snapshot. Readers clone the snapshot handle and never see a partially
//! written rule set; writers build a new vector and swap it in.

use std::sync::{Arc, RwLock};

use regex::{Regex, RegexBuilder};

use crate::errors::EngineError;
use crate::models::pattern::{CreateScamPattern, PatternCategory, ScamPattern};

const DEFAULT_WEIGHT: i32 = 5;

/// Seed rules: (category, pattern, weight, description).
const SEED_PATTERNS: &[(PatternCategory, &str, i32, &str)] = &[
    (PatternCategory::Loan, "instant loan", 8, "Instant loan offer"),
    (
        PatternCategory::Loan,
        r"(loan|credit)\W+(\w+\W+){0,3}(pre-?approved|sanctioned)",
        7,
        "Pre-approved loan claim",
    ),
    (PatternCategory::Loan, "no cibil", 6, "Loan without credit check"),
    (PatternCategory::Rummy, "rummy", 6, "Real-money rummy promotion"),
    (PatternCategory::Rummy, "guaranteed win", 8, "Guaranteed win promise"),
    (
        PatternCategory::Phishing,
        r"verify\W+(\w+\W+){0,2}(account|details)",
        7,
        "Account verification request",
    ),
    (
        PatternCategory::Phishing,
        "account will be blocked",
        8,
        "Account blocking threat",
    ),
    (PatternCategory::Upi, "upi pin", 9, "UPI PIN request"),
    (PatternCategory::Upi, "collect request", 7, "UPI collect request"),
    (
        PatternCategory::Lottery,
        r"(won|winner)\W+(\w+\W+){0,5}(lottery|lucky draw|jackpot)",
        8,
        "Lottery or lucky draw win claim",
    ),
    (PatternCategory::Lottery, "kbc", 6, "KBC lottery impersonation"),
    (
        PatternCategory::Kyc,
        r"kyc\W+(\w+\W+){0,3}(update|expired?|pending)",
        8,
        "KYC update request",
    ),
    (
        PatternCategory::Impersonation,
        "bank security",
        8,
        "Bank security team impersonation",
    ),
    (
        PatternCategory::Impersonation,
        "customer care number",
        5,
        "Unofficial customer care number",
    ),
    (
        PatternCategory::Investment,
        "double your money",
        8,
        "Money doubling scheme",
    ),
    (PatternCategory::Job, "work from home", 5, "Work-from-home job offer"),
    (PatternCategory::Job, "registration fee", 7, "Upfront registration fee demand"),
];

/// A rule plus its precompiled matchers.
#[derive(Debug)]
struct CompiledRule {
    rule: ScamPattern,
    needle: String,
    regex: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: ScamPattern) -> Self {
        let regex = match RegexBuilder::new(&rule.pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(
                    pattern = %rule.pattern,
                    error = %e,
                    "Rule is not a valid regex, matching as literal text only"
                );
                None
            }
        };
        Self {
            needle: rule.pattern.to_lowercase(),
            regex,
            rule,
        }
    }

    /// `content` is expected to be lowercased already.
    fn matches(&self, content: &str) -> bool {
        content.contains(&self.needle)
            || self.regex.as_ref().is_some_and(|re| re.is_match(content))
    }
}

type Snapshot = Arc<Vec<Arc<CompiledRule>>>;

/// Registry of scam patterns shared by every analyzer.
#[derive(Debug)]
pub struct PatternRegistry {
    rules: RwLock<Snapshot>,
}

impl PatternRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// A registry holding the built-in seed rules, with ids starting at 1.
    pub fn seeded() -> Self {
        let rules = SEED_PATTERNS
            .iter()
            .zip(1..)
            .map(|(&(category, pattern, weight, description), id)| {
                Arc::new(CompiledRule::compile(ScamPattern {
                    id,
                    category,
                    pattern: pattern.to_string(),
                    weight,
                    description: Some(description.to_string()),
                }))
            })
            .collect();
        Self {
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    fn snapshot(&self) -> Result<Snapshot, EngineError> {
        self.rules
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| EngineError::RegistryUnavailable)
    }

    /// All rules in insertion order, optionally restricted to one category.
    pub fn all_patterns(
        &self,
        category: Option<PatternCategory>,
    ) -> Result<Vec<ScamPattern>, EngineError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .iter()
            .filter(|c| category.map_or(true, |cat| c.rule.category == cat))
            .map(|c| c.rule.clone())
            .collect())
    }

    /// Append a rule, assigning the next id.
    pub fn add_pattern(&self, input: CreateScamPattern) -> Result<ScamPattern, EngineError> {
        let pattern = input.pattern.trim();
        if pattern.is_empty() {
            return Err(EngineError::InvalidInput(
                "pattern must not be empty".to_string(),
            ));
        }

        // Compile outside the lock; only id assignment and the swap are serialized.
        let mut compiled = CompiledRule::compile(ScamPattern {
            id: 0,
            category: input.category,
            pattern: pattern.to_string(),
            weight: input.weight.unwrap_or(DEFAULT_WEIGHT),
            description: input.description.filter(|d| !d.trim().is_empty()),
        });

        let mut guard = self
            .rules
            .write()
            .map_err(|_| EngineError::RegistryUnavailable)?;

        let id = guard.iter().map(|c| c.rule.id).max().unwrap_or(0) + 1;
        compiled.rule.id = id;
        let rule = compiled.rule.clone();

        let mut next: Vec<Arc<CompiledRule>> = guard.iter().cloned().collect();
        next.push(Arc::new(compiled));
        *guard = Arc::new(next);
        drop(guard);

        tracing::info!(pattern_id = id, category = ?rule.category, "Added scam pattern");
        Ok(rule)
    }

    /// Rules that fire on `content` (lowercased), in registry order.
    pub fn matching(&self, content: &str) -> Result<Vec<ScamPattern>, EngineError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .iter()
            .filter(|c| c.matches(content))
            .map(|c| c.rule.clone())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.snapshot().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
impl PatternRegistry {
    /// Poison the lock by panicking while holding the write guard.
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _guard = self.rules.write().unwrap();
                panic!("writer panicked while holding the registry lock");
            });
            assert!(writer.join().is_err());
        });
        assert!(self.rules.is_poisoned());
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: PatternCategory, pattern: &str) -> CreateScamPattern {
        CreateScamPattern {
            category,
            pattern: pattern.to_string(),
            weight: None,
            description: None,
        }
    }

    #[test]
    fn seeded_ids_are_sequential() {
        let registry = PatternRegistry::seeded();
        let all = registry.all_patterns(None).unwrap();
        assert_eq!(all.len(), SEED_PATTERNS.len());
        for (i, p) in all.iter().enumerate() {
            assert_eq!(p.id, i as i64 + 1);
            assert!(!p.pattern.is_empty());
        }
    }

    #[test]
    fn seed_regexes_compile() {
        let registry = PatternRegistry::seeded();
        let snapshot = registry.snapshot().unwrap();
        assert!(snapshot.iter().all(|c| c.regex.is_some()));
    }

    #[test]
    fn category_filter_preserves_order() {
        let registry = PatternRegistry::seeded();
        let loans = registry.all_patterns(Some(PatternCategory::Loan)).unwrap();
        assert_eq!(loans.len(), 3);
        assert!(loans.windows(2).all(|w| w[0].id < w[1].id));
        assert!(loans.iter().all(|p| p.category == PatternCategory::Loan));
    }

    #[test]
    fn consecutive_reads_are_identical() {
        let registry = PatternRegistry::seeded();
        assert_eq!(
            registry.all_patterns(None).unwrap(),
            registry.all_patterns(None).unwrap()
        );
    }

    #[test]
    fn add_assigns_next_id_and_defaults() {
        let registry = PatternRegistry::seeded();
        let added = registry
            .add_pattern(input(PatternCategory::Upi, "scan to receive"))
            .unwrap();
        assert_eq!(added.id, SEED_PATTERNS.len() as i64 + 1);
        assert_eq!(added.weight, DEFAULT_WEIGHT);
        assert_eq!(added.factor_text(), "scan to receive");

        let last = registry.all_patterns(None).unwrap().pop().unwrap();
        assert_eq!(last, added);
    }

    #[test]
    fn add_rejects_empty_pattern() {
        let registry = PatternRegistry::new();
        let result = registry.add_pattern(input(PatternCategory::Job, "   "));
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn returned_rules_are_copies() {
        let registry = PatternRegistry::seeded();
        let mut copy = registry.all_patterns(None).unwrap();
        copy[0].pattern = "tampered".to_string();
        copy[0].description = None;
        let fresh = registry.all_patterns(None).unwrap();
        assert_eq!(fresh[0].pattern, "instant loan");
    }

    #[test]
    fn literal_and_regex_matching() {
        let registry = PatternRegistry::seeded();
        let hits = registry
            .matching("congratulations! you are the winner of our lucky draw")
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].factor_text(), "Lottery or lucky draw win claim");

        let hits = registry.matching("get an instant loan today").unwrap();
        assert_eq!(hits[0].factor_text(), "Instant loan offer");
    }

    #[test]
    fn bad_regex_falls_back_to_literal() {
        let registry = PatternRegistry::seeded();
        registry
            .add_pattern(input(PatternCategory::Phishing, "free (gift"))
            .unwrap();

        let hits = registry.matching("claim your free (gift now").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pattern, "free (gift");
        assert_eq!(hits[0].id, SEED_PATTERNS.len() as i64 + 1);

        // Other rules keep working alongside the broken one
        let hits = registry.matching("share your upi pin").unwrap();
        assert_eq!(hits[0].factor_text(), "UPI PIN request");
    }

    #[test]
    fn readers_see_complete_snapshots_during_writes() {
        let registry = PatternRegistry::seeded();
        let base = SEED_PATTERNS.len();

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..50 {
                    registry
                        .add_pattern(input(PatternCategory::Job, &format!("job offer {i}")))
                        .unwrap();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        let all = registry.all_patterns(None).unwrap();
                        assert!(all.len() >= base);
                        // Ids are dense, so a complete snapshot ends at its length
                        assert_eq!(all.last().unwrap().id, all.len() as i64);
                        assert!(all.iter().all(|p| !p.pattern.is_empty()));
                    }
                });
            }
        });

        assert_eq!(registry.len(), base + 50);
    }

    #[test]
    fn ids_stay_dense_across_added_rules() {
        let registry = PatternRegistry::new();
        for (i, pattern) in ["lucky (draw", "easy money", "task reward"].iter().enumerate() {
            let added = registry
                .add_pattern(input(PatternCategory::Investment, pattern))
                .unwrap();
            assert_eq!(added.id, i as i64 + 1);
        }
        let ids: Vec<i64> = registry.all_patterns(None).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn poisoned_lock_is_reported_as_unavailable() {
        let registry = PatternRegistry::seeded();
        registry.poison();

        assert!(matches!(
            registry.all_patterns(None),
            Err(EngineError::RegistryUnavailable)
        ));
        assert!(matches!(
            registry.matching("instant loan"),
            Err(EngineError::RegistryUnavailable)
        ));
        assert!(matches!(
            registry.add_pattern(input(PatternCategory::Loan, "zero interest")),
            Err(EngineError::RegistryUnavailable)
        ));
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }
}

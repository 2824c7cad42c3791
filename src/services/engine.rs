//! Detection engine: channel dispatch, registry cross-check, and scoring.
//!
//! Analysis is pure with respect to its input and the current registry
//! snapshot. The engine holds no per-call state and is shared across
//! requests behind an `Arc`.

use std::sync::Arc;

use crate::errors::EngineError;
use crate::models::analysis::AnalysisResult;
use crate::models::pattern::{PatternCategory, ScamPattern};
use crate::models::scan::Channel;
use crate::services::channels::{self, phone::PhoneFindings, ChannelRegexes};
use crate::services::keywords::KeywordLists;
use crate::services::registry::PatternRegistry;
use crate::services::risk_score;
use crate::services::threat_intel::{ScammerTable, ThreatLookup};

pub struct Engine {
    keywords: KeywordLists,
    registry: Arc<PatternRegistry>,
    scammers: ScammerTable,
    threat_lookup: Option<Arc<dyn ThreatLookup>>,
    regexes: ChannelRegexes,
}

impl Engine {
    pub fn new(
        keywords: KeywordLists,
        registry: Arc<PatternRegistry>,
        scammers: ScammerTable,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            keywords,
            registry,
            scammers,
            threat_lookup: None,
            regexes: ChannelRegexes::new()?,
        })
    }

    /// Attach an external threat feed, consulted before the static table.
    pub fn with_threat_lookup(mut self, lookup: Arc<dyn ThreatLookup>) -> Self {
        self.threat_lookup = Some(lookup);
        self
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Raw registry rules, e.g. for an admin view.
    pub fn registry_patterns(
        &self,
        category: Option<PatternCategory>,
    ) -> Result<Vec<ScamPattern>, EngineError> {
        self.registry.all_patterns(category)
    }

    /// Analyze content for a channel. `secondary` is only read for APKs.
    pub fn analyze(&self, channel: Channel, primary: &str, secondary: Option<&str>) -> AnalysisResult {
        let result = match channel {
            Channel::Url => self.analyze_url(primary),
            Channel::Sms => self.analyze_sms(primary),
            Channel::Call => self.analyze_call(primary),
            Channel::Apk => self.analyze_apk(primary, secondary.unwrap_or("")),
            Channel::Phone => self.analyze_phone(primary),
            Channel::Qr => self.analyze_qr(primary),
        };

        tracing::debug!(
            channel = %channel,
            factors = result.risk_factors.len(),
            confidence = result.confidence,
            "Analysis complete"
        );
        result
    }

    /// Like [`Engine::analyze`], but rejects empty content up front.
    pub fn try_analyze(
        &self,
        channel: Channel,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<AnalysisResult, EngineError> {
        if primary.trim().is_empty() {
            let field = if channel == Channel::Apk { "app name" } else { "content" };
            return Err(EngineError::InvalidInput(format!("{field} must not be empty")));
        }
        Ok(self.analyze(channel, primary, secondary))
    }

    pub fn analyze_url(&self, url: &str) -> AnalysisResult {
        let text = normalize(url);
        if text.is_empty() {
            return baseline();
        }
        let factors = channels::url::check(&text, &self.keywords, &self.regexes);
        self.finish(factors, &text)
    }

    pub fn analyze_sms(&self, message: &str) -> AnalysisResult {
        let text = normalize(message);
        if text.is_empty() {
            return baseline();
        }
        let factors = channels::sms::check(&text, &self.keywords, &self.regexes);
        self.finish(factors, &text)
    }

    pub fn analyze_call(&self, transcript: &str) -> AnalysisResult {
        let text = normalize(transcript);
        if text.is_empty() {
            return baseline();
        }
        let factors = channels::call::check(&text, &self.keywords);
        self.finish(factors, &text)
    }

    pub fn analyze_apk(&self, app_name: &str, extracted_strings: &str) -> AnalysisResult {
        let name = normalize(app_name);
        let strings = normalize(extracted_strings);
        if name.is_empty() && strings.is_empty() {
            return baseline();
        }
        let factors = channels::apk::check(&name, &strings, &self.keywords);
        self.finish(factors, &format!("{name} {strings}"))
    }

    pub fn analyze_phone(&self, number: &str) -> AnalysisResult {
        let text = normalize(number);
        if text.is_empty() {
            return baseline();
        }

        let mut sources: Vec<&dyn ThreatLookup> = Vec::with_capacity(2);
        if let Some(external) = &self.threat_lookup {
            sources.push(external.as_ref());
        }
        sources.push(&self.scammers);

        match channels::phone::check(&text, &sources, &self.keywords) {
            PhoneFindings::Known {
                risk_factors,
                confidence,
            } => AnalysisResult {
                risk_factors,
                confidence,
            },
            PhoneFindings::Heuristic(factors) => {
                let confidence = risk_score::score(&factors);
                AnalysisResult {
                    risk_factors: factors,
                    confidence,
                }
            }
        }
    }

    pub fn analyze_qr(&self, payload: &str) -> AnalysisResult {
        let text = normalize(payload);
        if text.is_empty() {
            return baseline();
        }
        let factors = channels::qr::check(&text, &self.keywords, &self.regexes);
        self.finish(factors, &text)
    }

    /// Append registry matches, drop duplicates, and score.
    fn finish(&self, mut factors: Vec<String>, text: &str) -> AnalysisResult {
        factors.extend(self.cross_check(text, &factors));
        let factors = dedup(factors);
        let confidence = risk_score::score(&factors);
        AnalysisResult {
            risk_factors: factors,
            confidence,
        }
    }

    /// Registry rules firing on `text`, minus keywords a heuristic already quoted.
    fn cross_check(&self, text: &str, existing: &[String]) -> Vec<String> {
        let matches = match self.registry.matching(text) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping registry cross-check");
                return Vec::new();
            }
        };

        matches
            .into_iter()
            .filter(|rule| {
                let quoted = format!("\"{}\"", rule.pattern.to_lowercase());
                !existing.iter().any(|f| f.to_lowercase().contains(&quoted))
            })
            .map(|rule| rule.factor_text().to_string())
            .collect()
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

fn baseline() -> AnalysisResult {
    AnalysisResult {
        risk_factors: Vec::new(),
        confidence: risk_score::BASELINE_CONFIDENCE,
    }
}

/// Remove repeated factor strings, keeping the first occurrence.
fn dedup(factors: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    factors
        .into_iter()
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

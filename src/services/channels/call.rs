//! Call transcript checks: impersonated authority, credential requests, threats.

use super::first_match;
use crate::services::keywords::{KeywordLists, AUTHORITY_NAMES, SENSITIVE_REQUESTS, THREAT_WORDS};

pub fn check(transcript: &str, lists: &KeywordLists) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(name) = first_match(transcript, lists.get(AUTHORITY_NAMES)) {
        factors.push(format!("Authority impersonation: \"{name}\""));
    }

    if let Some(request) = first_match(transcript, lists.get(SENSITIVE_REQUESTS)) {
        factors.push(format!("Requests sensitive info: \"{request}\""));
    }

    if let Some(threat) = first_match(transcript, lists.get(THREAT_WORDS)) {
        factors.push(format!("Threat or intimidation: \"{threat}\""));
    }

    factors
}

//! QR payload checks. Payment intents are inspected directly; links and
//! free text reuse the URL and SMS checks.

use super::{sms, url, ChannelRegexes};
use crate::services::keywords::KeywordLists;

pub fn check(payload: &str, lists: &KeywordLists, regexes: &ChannelRegexes) -> Vec<String> {
    if payload.starts_with("upi://") {
        return upi_intent(payload);
    }

    if looks_like_url(payload) {
        url::check(payload, lists, regexes)
    } else {
        sms::check(payload, lists, regexes)
    }
}

fn upi_intent(payload: &str) -> Vec<String> {
    let mut factors = Vec::new();
    let query = payload.split_once('?').map(|(_, q)| q).unwrap_or("");
    let has_amount = query
        .split('&')
        .any(|pair| pair.starts_with("am=") && pair.len() > 3);

    // Scanning to *receive* money never needs a pre-filled amount.
    if payload.starts_with("upi://pay") && has_amount {
        factors.push("QR triggers UPI payment with pre-filled amount".to_string());
    }
    factors
}

fn looks_like_url(payload: &str) -> bool {
    payload.starts_with("http://") || payload.starts_with("https://") || payload.starts_with("www.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::channels::test_support::fixtures;

    #[test]
    fn upi_with_amount() {
        let (lists, rx) = fixtures();
        let factors = check("upi://pay?pa=prize@upi&pn=reward&am=4999", &lists, &rx);
        assert_eq!(
            factors,
            vec!["QR triggers UPI payment with pre-filled amount".to_string()]
        );
    }

    #[test]
    fn merchant_upi_without_amount_is_clean() {
        let (lists, rx) = fixtures();
        assert!(check("upi://pay?pa=shop@okbank&pn=corner%20store", &lists, &rx).is_empty());
    }

    #[test]
    fn link_payload_uses_url_checks() {
        let (lists, rx) = fixtures();
        let factors = check("http://tinyurl.com/free", &lists, &rx);
        assert_eq!(factors[0], "Suspicious domain: \"tinyurl.com\"");
    }

    #[test]
    fn text_payload_uses_sms_checks() {
        let (lists, rx) = fixtures();
        let factors = check("claim prize now", &lists, &rx);
        assert_eq!(factors, vec!["Scam phrase: \"claim prize\"".to_string()]);
    }
}

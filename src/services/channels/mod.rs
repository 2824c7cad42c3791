//! Channel-specific signal checks.
//!
//! Every check receives content that is already trimmed and lowercased and
//! contributes at most one risk factor. A matched keyword appears in the
//! factor text in double quotes, which is what the engine's registry
//! cross-check looks for. Scoring and the cross-check happen in the engine.

pub mod apk;
pub mod call;
pub mod phone;
pub mod qr;
pub mod sms;
pub mod url;

use regex::Regex;

/// Regexes shared by the text channels, compiled once per engine.
#[derive(Debug, Clone)]
pub struct ChannelRegexes {
    pub ipv4: Regex,
    pub money: Regex,
}

impl ChannelRegexes {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            ipv4: Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b")?,
            money: Regex::new(r"(?:₹|\brs\.?|\binr)\s*\d[\d,]*|\d[\d,.]*\s*(?:lakh|crore)")?,
        })
    }
}

/// First keyword from `words` contained in `text`.
pub(crate) fn first_match<'a>(text: &str, words: &'a [String]) -> Option<&'a str> {
    words
        .iter()
        .map(String::as_str)
        .find(|w| text.contains(w))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ChannelRegexes;
    use crate::services::keywords::KeywordLists;

    pub fn fixtures() -> (KeywordLists, ChannelRegexes) {
        (KeywordLists::default(), ChannelRegexes::new().unwrap())
    }
}

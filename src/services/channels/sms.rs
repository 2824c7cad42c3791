//! SMS checks: urgency, money amounts, shortened links, scam phrasing.

use super::{first_match, ChannelRegexes};
use crate::services::keywords::{KeywordLists, SCAM_PHRASES, URGENCY_WORDS, URL_SHORTENERS};

pub fn check(message: &str, lists: &KeywordLists, regexes: &ChannelRegexes) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(word) = first_match(message, lists.get(URGENCY_WORDS)) {
        factors.push(format!("Urgency tactic: \"{word}\""));
    }

    if regexes.money.is_match(message) {
        factors.push("Mentions money amount".to_string());
    }

    if let Some(shortener) = first_match(message, lists.get(URL_SHORTENERS)) {
        factors.push(format!("Contains shortened URL: \"{shortener}\""));
    }

    if let Some(phrase) = first_match(message, lists.get(SCAM_PHRASES)) {
        factors.push(format!("Scam phrase: \"{phrase}\""));
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::channels::test_support::fixtures;

    #[test]
    fn ordinary_message_is_clean() {
        let (lists, rx) = fixtures();
        assert!(check("see you at dinner tonight", &lists, &rx).is_empty());
    }

    #[test]
    fn prize_scam_hits_every_check() {
        let (lists, rx) = fixtures();
        let factors = check(
            "congratulations! you won rs. 25,00,000. claim within 24h, offer will expire: bit.ly/xyz",
            &lists,
            &rx,
        );
        assert_eq!(
            factors,
            vec![
                "Urgency tactic: \"expire\"".to_string(),
                "Mentions money amount".to_string(),
                "Contains shortened URL: \"bit.ly\"".to_string(),
                "Scam phrase: \"congratulations\"".to_string(),
            ]
        );
    }

    #[test]
    fn one_factor_per_check() {
        let (lists, rx) = fixtures();
        let factors = check("urgent urgent immediate: account suspend", &lists, &rx);
        assert_eq!(factors, vec!["Urgency tactic: \"urgent\"".to_string()]);
    }
}

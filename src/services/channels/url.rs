//! URL checks: suspicious domains, raw IP hosts, deep subdomains, plain HTTP.

use super::ChannelRegexes;
use crate::services::keywords::{KeywordLists, SUSPICIOUS_TLDS, URL_SHORTENERS};

const MAX_DOTS: usize = 3;

pub fn check(url: &str, lists: &KeywordLists, regexes: &ChannelRegexes) -> Vec<String> {
    let mut factors = Vec::new();
    let host = host(url);

    let domain = lists
        .get(SUSPICIOUS_TLDS)
        .iter()
        .find(|tld| host.ends_with(tld.as_str()))
        .or_else(|| {
            lists
                .get(URL_SHORTENERS)
                .iter()
                .find(|s| host == s.as_str() || host.ends_with(&format!(".{s}")))
        });
    if let Some(domain) = domain {
        factors.push(format!("Suspicious domain: \"{domain}\""));
    }

    if regexes.ipv4.is_match(url) {
        factors.push("Uses IP address instead of domain name".to_string());
    }

    let dots = url.matches('.').count();
    if dots > MAX_DOTS {
        factors.push(format!("Too many subdomains ({dots} dots)"));
    }

    if !url.starts_with("https://") {
        factors.push("Not using secure HTTPS connection".to_string());
    }

    factors
}

/// Host part of a URL: no scheme, userinfo, port, path, query or fragment.
fn host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest
        .find(['/', '?', '#'])
        .map_or(rest, |end| &rest[..end]);
    let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    authority.split_once(':').map_or(authority, |(h, _)| h)
}

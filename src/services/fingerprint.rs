//! Content fingerprints linking scans to community reports.
//!
//! The same content submitted through the same channel always hashes to the
//! same value, regardless of surrounding whitespace or letter case.

use sha2::{Digest, Sha256};

use crate::models::scan::Channel;

/// Compute the fingerprint for a piece of submitted content.
///
/// Phone numbers are reduced to their digits so that formatting differences
/// (`+91 98765-43210` vs `919876543210`) collapse to one fingerprint.
pub fn compute(channel: Channel, content: &str) -> String {
    let normalized = match channel {
        Channel::Phone => content.chars().filter(char::is_ascii_digit).collect(),
        _ => content.trim().to_lowercase(),
    };
    hash(&format!("{channel}:{normalized}"))
}

/// SHA-256 hash a string and return hex-encoded digest.
fn hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

//! Detection engine and the services built around it.

pub mod channels;
pub mod engine;
pub mod fingerprint;
pub mod keywords;
pub mod registry;
pub mod risk_score;
pub mod scan;
pub mod threat_intel;

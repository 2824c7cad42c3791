//! Domain models and DTOs shared by the engine, store, and routes.

pub mod analysis;
pub mod pattern;
pub mod scan;

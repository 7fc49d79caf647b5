//! Database models for the Henco inventory & pricing backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;

//! Shared types and domain logic for the Henco inventory & pricing platform
//!
//! This crate contains types shared between the backend, the browser frontend
//! (via WASM), and other components of the system, plus the pure pricing
//! arithmetic both sides rely on.

pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;

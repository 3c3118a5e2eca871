//! `gemforge-catalog` — gem domain model and pricing.
//!
//! Pure domain crate: no IO, no transport, no storage.

pub mod gem;
pub mod pricing;

pub use gem::{Gem, GemClarity, GemColor, GemFilter, GemProperties, GemType};
pub use pricing::price;

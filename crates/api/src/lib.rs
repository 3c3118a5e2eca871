//! `gemforge-api` — HTTP surface for the gem marketplace.

pub mod app;
pub mod context;

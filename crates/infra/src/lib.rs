//! `gemforge-infra` — storage collaborators and infrastructure concerns.
//!
//! The domain treats storage as an external collaborator: this crate owns the
//! [`store::UserDirectory`] and [`store::GemRepository`] contracts plus their
//! in-memory and Postgres backends.

pub mod error;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use store::{GemRepository, MemoryStore, PostgresStore, UserDirectory};

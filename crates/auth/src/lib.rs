//! `gemforge-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod account;
pub mod authorize;
pub mod claims;
pub mod error;
pub mod password;
pub mod token;

pub use account::{Account, NewAccount};
pub use authorize::{authorize_mutation, require_seller, AuthzError};
pub use claims::TokenClaims;
pub use error::AuthError;
pub use password::PasswordHasher;
pub use token::TokenService;

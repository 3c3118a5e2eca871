use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gemforge_core::UserId;

/// A registered account.
///
/// # Invariants
/// - `username` is unique across the directory (enforced by the storage
///   backend, not by callers).
/// - `password_hash` is a one-way hash; the plaintext is never stored.
/// - Immutable after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_seller: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether this account may create and manage gem listings.
    pub fn is_seller(&self) -> bool {
        self.is_seller
    }
}

/// Registration input for the account directory.
///
/// The password arrives here already hashed; validation of the plaintext
/// (length, confirmation) happens at the API boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_seller: bool,
}

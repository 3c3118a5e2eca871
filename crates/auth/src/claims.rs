use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Signed-token claims (transport-agnostic).
///
/// This is the full set of claims a GemForge token carries: the subject is
/// the account's username, `iat`/`exp` are Unix timestamps. The token asserts
/// identity, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account's username.
    pub sub: String,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `subject` valid from `now` for `ttl`.
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Whether the token window has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

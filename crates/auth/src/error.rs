use thiserror::Error;

/// Authentication failure.
///
/// Every variant maps to a distinct signal for the caller; none are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password at login. Deliberately a single
    /// variant so the two cases are indistinguishable from the outside.
    #[error("invalid username and/or password")]
    InvalidCredentials,

    /// Token signature/structure was valid but the token is past its window.
    #[error("token has expired")]
    ExpiredToken,

    /// Token signature or structure is invalid.
    #[error("invalid token")]
    InvalidToken,

    /// Token was fine but no account could be resolved for its subject.
    #[error("could not resolve an account for this token")]
    Unauthorized,

    /// Hashing or signing machinery failed (never caused by user input).
    #[error("crypto failure: {0}")]
    Crypto(String),
}

impl AuthError {
    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }
}

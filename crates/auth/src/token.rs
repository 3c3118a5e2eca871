use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::TokenClaims;
use crate::error::AuthError;

/// Default token lifetime.
const DEFAULT_TTL_HOURS: i64 = 8;

/// Issues and verifies signed identity tokens (HS256).
///
/// Verification is stateless: there is no server-side revocation list, a
/// token is valid until its window closes. The signing secret is injected at
/// construction and read-only afterwards.
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    /// Create a service with the default 8-hour token lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Create a service with an explicit token lifetime.
    pub fn with_ttl(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issue a token asserting `subject`, valid from now for the configured
    /// lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let claims = TokenClaims::new(subject, Utc::now(), self.ttl);

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::crypto(format!("failed to sign token: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with [`AuthError::ExpiredToken`] once past `exp` (no leeway) and
    /// [`AuthError::InvalidToken`] for any signature/structure problem.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-minimum-32-characters-long")
    }

    #[test]
    fn issue_then_verify_returns_the_subject() {
        let tokens = service();

        let token = tokens.issue("gem_dealer_42").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.subject(), "gem_dealer_42");
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Issue a token whose window closed an hour ago.
        let expired = TokenService::with_ttl(
            "test-secret-key-minimum-32-characters-long",
            Duration::hours(-1),
        );

        let token = expired.issue("gem_dealer_42").unwrap();
        let err = service().verify(&token).unwrap_err();

        assert_eq!(err, AuthError::ExpiredToken);
    }

    #[test]
    fn token_signed_with_a_different_secret_is_invalid() {
        let other = TokenService::new("wrong-secret-key-minimum-32-characters");

        let token = other.issue("gem_dealer_42").unwrap();
        let err = service().verify(&token).unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn structurally_broken_token_is_invalid() {
        let err = service().verify("not.a.token").unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains("test-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}

//! Request-scoped identity: bearer-token extraction and current-account
//! resolution.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::Response,
};

use gemforge_auth::{Account, AuthError, TokenService};
use gemforge_core::UserId;
use gemforge_infra::UserDirectory;

use crate::app::errors;

/// Auth collaborators shared with the current-account extractor.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub directory: Arc<dyn UserDirectory>,
}

/// The authenticated account for the current request.
///
/// Extracting this from a request performs the whole resolution chain:
/// read the bearer header, verify the token, look the subject up in the
/// directory. Handlers that take a `CurrentAccount` argument are therefore
/// unreachable for anonymous or stale-token callers; public handlers simply
/// don't take one.
#[derive(Debug, Clone)]
pub struct CurrentAccount(Account);

impl CurrentAccount {
    pub fn account(&self) -> &Account {
        &self.0
    }

    pub fn id(&self) -> UserId {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthState>()
            .cloned()
            .ok_or_else(|| {
                errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "misconfigured",
                    "auth state not installed",
                )
            })?;

        let token = extract_bearer(&parts.headers)?;
        let claims = auth
            .tokens
            .verify(token)
            .map_err(errors::auth_error_to_response)?;

        let account = auth
            .directory
            .find_by_username(claims.subject())
            .await
            .map_err(errors::store_error_to_response)?
            .ok_or_else(|| errors::auth_error_to_response(AuthError::Unauthorized))?;

        Ok(CurrentAccount(account))
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let unauthorized =
        || errors::auth_error_to_response(AuthError::Unauthorized);

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let header = header.to_str().map_err(|_| unauthorized())?;

    let header = header.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }

    Ok(token)
}

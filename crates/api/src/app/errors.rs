use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gemforge_auth::{AuthError, AuthzError};
use gemforge_core::DomainError;
use gemforge_infra::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", message)
        }
        AuthError::ExpiredToken => json_error(StatusCode::UNAUTHORIZED, "expired_token", message),
        AuthError::InvalidToken => json_error(StatusCode::UNAUTHORIZED, "invalid_token", message),
        AuthError::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "unauthorized", message),
        AuthError::Crypto(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "crypto_error", message)
        }
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        StoreError::UsernameTaken => json_error(StatusCode::CONFLICT, "username_taken", message),
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        StoreError::Backend(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

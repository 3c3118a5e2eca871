use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use gemforge_auth::{AuthError, NewAccount};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentAccount;

pub fn router() -> Router {
    Router::new()
        .route("/registration", post(register))
        .route("/login", post(login))
        .route("/users/me", get(me))
}

/// Register a new account. Uniqueness is enforced by the directory backend;
/// a duplicate username surfaces as a conflict without touching storage.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if let Err(e) = body.validate() {
        return errors::domain_error_to_response(e);
    }

    let password_hash = match services.hasher.hash(&body.password) {
        Ok(h) => h,
        Err(e) => return errors::auth_error_to_response(e),
    };

    let created = services
        .directory
        .create(NewAccount {
            username: body.username,
            email: body.email,
            password_hash,
            is_seller: body.is_seller,
        })
        .await;

    match created {
        Ok(account) => {
            tracing::info!(username = %account.username, "account registered");
            (StatusCode::CREATED, Json(dto::account_to_json(&account))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Verify credentials and issue a token.
///
/// Unknown username and wrong password are deliberately the same signal.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let account = match services.directory.find_by_username(&body.username).await {
        Ok(Some(account)) => account,
        Ok(None) => return errors::auth_error_to_response(AuthError::InvalidCredentials),
        Err(e) => return errors::store_error_to_response(e),
    };

    match services.hasher.verify(&body.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => return errors::auth_error_to_response(AuthError::InvalidCredentials),
        Err(e) => return errors::auth_error_to_response(e),
    }

    match services.tokens.issue(&account.username) {
        Ok(token) => (StatusCode::OK, Json(serde_json::json!({ "token": token }))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

pub async fn me(current: CurrentAccount) -> axum::response::Response {
    (StatusCode::OK, Json(dto::account_to_json(current.account()))).into_response()
}

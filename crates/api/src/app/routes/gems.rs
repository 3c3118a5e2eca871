use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use gemforge_auth::{authorize_mutation, require_seller};
use gemforge_catalog::{pricing, Gem};
use gemforge_core::GemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentAccount;

pub fn router() -> Router {
    Router::new()
        .route("/gems", get(list_gems).post(create_gem))
        .route("/gems/seller/me", get(my_gems))
        .route(
            "/gems/:id",
            get(get_gem)
                .put(update_gem)
                .patch(patch_gem)
                .delete(delete_gem),
        )
}

/// Public catalog listing with optional price bounds and kind filter.
pub async fn list_gems(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::GemListQuery>,
) -> axum::response::Response {
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.gems.list(&filter).await {
        Ok(gems) => {
            let items = gems.iter().map(dto::gem_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "gems": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_gem(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: GemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid gem id"),
    };

    match services.gems.get(id).await {
        Ok(Some(gem)) => (StatusCode::OK, Json(dto::gem_to_json(&gem))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "gem not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Create a listing (sellers only). The price is computed from the submitted
/// properties; a client-sent price is not accepted.
pub async fn create_gem(
    current: CurrentAccount,
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateGemRequest>,
) -> axum::response::Response {
    if let Err(e) = require_seller(current.account()) {
        return errors::authz_error_to_response(e);
    }

    let price = match pricing::price(body.gem_type, &body.properties) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let gem = Gem {
        id: GemId::new(),
        price,
        available: body.available,
        kind: body.gem_type,
        seller_id: current.id(),
        properties: body.properties,
    };

    match services.gems.insert(gem).await {
        Ok(stored) => {
            tracing::info!(gem_id = %stored.id, seller = %current.account().username, "gem listed");
            (StatusCode::CREATED, Json(dto::gem_to_json(&stored))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Full replacement of a listing (owning seller only).
pub async fn update_gem(
    current: CurrentAccount,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateGemRequest>,
) -> axum::response::Response {
    let id: GemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid gem id"),
    };

    let existing = match services.gems.get(id).await {
        Ok(Some(gem)) => gem,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "gem not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = authorize_mutation(current.account(), existing.seller_id) {
        return errors::authz_error_to_response(e);
    }

    if let Err(e) = body.properties.validate(body.gem_type) {
        return errors::domain_error_to_response(e);
    }

    let gem = Gem {
        id: existing.id,
        price: body.price,
        available: body.available,
        kind: body.gem_type,
        seller_id: existing.seller_id,
        properties: body.properties,
    };

    match services.gems.update(gem).await {
        Ok(updated) => (StatusCode::OK, Json(dto::gem_to_json(&updated))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Partial update of a listing (owning seller only). Absent fields keep
/// their stored values.
pub async fn patch_gem(
    current: CurrentAccount,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PatchGemRequest>,
) -> axum::response::Response {
    let id: GemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid gem id"),
    };

    let mut gem = match services.gems.get(id).await {
        Ok(Some(gem)) => gem,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "gem not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = authorize_mutation(current.account(), gem.seller_id) {
        return errors::authz_error_to_response(e);
    }

    if let Some(price) = body.price {
        gem.price = price;
    }
    if let Some(available) = body.available {
        gem.available = available;
    }
    if let Some(kind) = body.gem_type {
        gem.kind = kind;
    }

    // A kind change can invalidate the stored properties (diamonds need a
    // color grade).
    if let Err(e) = gem.properties.validate(gem.kind) {
        return errors::domain_error_to_response(e);
    }

    match services.gems.update(gem).await {
        Ok(updated) => (StatusCode::OK, Json(dto::gem_to_json(&updated))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_gem(
    current: CurrentAccount,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: GemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid gem id"),
    };

    let existing = match services.gems.get(id).await {
        Ok(Some(gem)) => gem,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "gem not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = authorize_mutation(current.account(), existing.seller_id) {
        return errors::authz_error_to_response(e);
    }

    match services.gems.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The caller's own listings (sellers only).
pub async fn my_gems(
    current: CurrentAccount,
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    if let Err(e) = require_seller(current.account()) {
        return errors::authz_error_to_response(e);
    }

    match services.gems.list_by_seller(current.id()).await {
        Ok(gems) => {
            let items = gems.iter().map(dto::gem_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "gems": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

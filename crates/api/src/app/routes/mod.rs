use axum::{routing::get, Router};

pub mod gems;
pub mod system;
pub mod users;

/// Router for the whole API surface.
///
/// Reads are public; mutating handlers authenticate by extracting a
/// [`crate::context::CurrentAccount`].
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(users::router())
        .merge(gems::router())
}

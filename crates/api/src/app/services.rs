use std::sync::Arc;

use gemforge_auth::{PasswordHasher, TokenService};
use gemforge_infra::{seed, GemRepository, MemoryStore, PostgresStore, UserDirectory};

/// Process-wide service handles, wired once at startup and shared via an
/// axum `Extension`. No ambient globals: the hasher and token service are
/// plain values constructed here.
pub struct AppServices {
    pub directory: Arc<dyn UserDirectory>,
    pub gems: Arc<dyn GemRepository>,
    pub hasher: PasswordHasher,
    pub tokens: Arc<TokenService>,
}

pub async fn build_services(jwt_secret: String) -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let (directory, gems): (Arc<dyn UserDirectory>, Arc<dyn GemRepository>) = if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
        let store = Arc::new(
            PostgresStore::connect(&database_url)
                .await
                .expect("failed to connect to Postgres"),
        );
        (store.clone(), store)
    } else {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), store)
    };

    let hasher = PasswordHasher::new();
    let tokens = Arc::new(TokenService::new(jwt_secret));

    maybe_seed(directory.as_ref(), gems.as_ref(), &hasher).await;

    AppServices {
        directory,
        gems,
        hasher,
        tokens,
    }
}

/// Seed demo gems when `SEED_DEMO_GEMS=<count>` is set. Failures are logged,
/// not fatal; the API still serves an empty catalog.
async fn maybe_seed(
    directory: &dyn UserDirectory,
    gems: &dyn GemRepository,
    hasher: &PasswordHasher,
) {
    let Ok(raw) = std::env::var("SEED_DEMO_GEMS") else {
        return;
    };

    match raw.parse::<usize>() {
        Ok(count) if count > 0 => {
            if let Err(e) = seed::populate_demo_catalog(directory, gems, hasher, count).await {
                tracing::warn!("demo seeding failed: {e}");
            }
        }
        _ => tracing::warn!("SEED_DEMO_GEMS must be a positive integer, got '{raw}'"),
    }
}

//! Demo-catalog seeding for dev environments.

use rand::Rng;

use gemforge_auth::{NewAccount, PasswordHasher};
use gemforge_catalog::{pricing, Gem, GemClarity, GemColor, GemProperties, GemType};
use gemforge_core::GemId;

use crate::error::StoreError;
use crate::store::{GemRepository, UserDirectory};

const DEMO_SELLER: &str = "demo-seller";

/// Seed `count` random gems owned by a `demo-seller` account.
///
/// The seller is created on first run (with a random throwaway password) and
/// reused afterwards, so seeding is safe to repeat.
pub async fn populate_demo_catalog(
    directory: &dyn UserDirectory,
    gems: &dyn GemRepository,
    hasher: &PasswordHasher,
    count: usize,
) -> Result<(), StoreError> {
    let seller = match directory.find_by_username(DEMO_SELLER).await? {
        Some(existing) => existing,
        None => {
            let password_hash = hasher
                .hash(&random_password())
                .map_err(StoreError::backend)?;
            directory
                .create(NewAccount {
                    username: DEMO_SELLER.to_string(),
                    email: format!("{DEMO_SELLER}@example.com"),
                    password_hash,
                    is_seller: true,
                })
                .await?
        }
    };

    let mut rng = rand::rng();
    for _ in 0..count {
        let kind = GemType::ALL[rng.random_range(0..GemType::ALL.len())];
        let properties = GemProperties {
            size: rng.random_range(3..=70) as f64 / 10.0,
            clarity: GemClarity::ALL[rng.random_range(0..GemClarity::ALL.len())],
            color: Some(GemColor::ALL[rng.random_range(0..GemColor::ALL.len())]),
        };

        let price = pricing::price(kind, &properties).map_err(StoreError::backend)?;

        gems.insert(Gem {
            id: GemId::new(),
            price: (price * 100.0).round() / 100.0,
            available: true,
            kind,
            seller_id: seller.id,
            properties,
        })
        .await?;
    }

    tracing::info!(count, seller = DEMO_SELLER, "seeded demo catalog");
    Ok(())
}

/// Throwaway credential for the demo seller. Nobody is meant to log in with
/// it; it only has to be unguessable.
fn random_password() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();
    (0..20)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeding_creates_a_seller_and_priced_gems() {
        let store = MemoryStore::new();
        let hasher = PasswordHasher::with_cost(4);

        populate_demo_catalog(&store, &store, &hasher, 10).await.unwrap();

        let seller = store
            .find_by_username(DEMO_SELLER)
            .await
            .unwrap()
            .expect("demo seller registered");
        assert!(seller.is_seller);

        let gems = store.list_by_seller(seller.id).await.unwrap();
        assert_eq!(gems.len(), 10);
        for gem in &gems {
            assert!(gem.price > 0.0);
            assert!(gem.properties.size >= 0.3 && gem.properties.size <= 7.0);
        }
    }

    #[tokio::test]
    async fn seeding_twice_reuses_the_demo_seller() {
        let store = MemoryStore::new();
        let hasher = PasswordHasher::with_cost(4);

        populate_demo_catalog(&store, &store, &hasher, 3).await.unwrap();
        populate_demo_catalog(&store, &store, &hasher, 3).await.unwrap();

        assert_eq!(store.list_accounts().await.unwrap().len(), 1);
        let seller = store.find_by_username(DEMO_SELLER).await.unwrap().unwrap();
        assert_eq!(store.list_by_seller(seller.id).await.unwrap().len(), 6);
    }
}

//! In-memory store for dev/test.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use gemforge_auth::{Account, NewAccount};
use gemforge_catalog::{Gem, GemFilter};
use gemforge_core::{GemId, UserId};

use crate::error::StoreError;
use crate::store::{GemRepository, UserDirectory};

/// In-memory backend implementing both storage contracts.
///
/// Username uniqueness is checked under the accounts write lock, so
/// concurrent registrations of the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<UserId, Account>>,
    gems: RwLock<HashMap<GemId, Gem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("store lock poisoned")
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;

        if accounts.values().any(|a| a.username == account.username) {
            return Err(StoreError::UsernameTaken);
        }

        let record = Account {
            id: UserId::new(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            is_seller: account.is_seller,
            created_at: Utc::now(),
        };
        accounts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(&id).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| *a.id.as_uuid());
        Ok(all)
    }
}

#[async_trait]
impl GemRepository for MemoryStore {
    async fn insert(&self, gem: Gem) -> Result<Gem, StoreError> {
        let mut gems = self.gems.write().map_err(|_| poisoned())?;
        gems.insert(gem.id, gem.clone());
        Ok(gem)
    }

    async fn get(&self, id: GemId) -> Result<Option<Gem>, StoreError> {
        let gems = self.gems.read().map_err(|_| poisoned())?;
        Ok(gems.get(&id).cloned())
    }

    async fn list(&self, filter: &GemFilter) -> Result<Vec<Gem>, StoreError> {
        let gems = self.gems.read().map_err(|_| poisoned())?;
        let mut matched: Vec<Gem> = gems.values().filter(|g| filter.matches(g)).cloned().collect();

        if filter.kinds.is_empty() {
            matched.sort_by_key(|g| *g.id.as_uuid());
        } else {
            matched.sort_by(|a, b| {
                a.kind
                    .as_str()
                    .cmp(b.kind.as_str())
                    .then(b.price.partial_cmp(&a.price).unwrap_or(core::cmp::Ordering::Equal))
            });
        }
        Ok(matched)
    }

    async fn list_by_seller(&self, seller_id: UserId) -> Result<Vec<Gem>, StoreError> {
        let gems = self.gems.read().map_err(|_| poisoned())?;
        let mut mine: Vec<Gem> = gems
            .values()
            .filter(|g| g.seller_id == seller_id)
            .cloned()
            .collect();
        mine.sort_by_key(|g| *g.id.as_uuid());
        Ok(mine)
    }

    async fn update(&self, gem: Gem) -> Result<Gem, StoreError> {
        let mut gems = self.gems.write().map_err(|_| poisoned())?;
        if !gems.contains_key(&gem.id) {
            return Err(StoreError::NotFound);
        }
        gems.insert(gem.id, gem.clone());
        Ok(gem)
    }

    async fn delete(&self, id: GemId) -> Result<(), StoreError> {
        let mut gems = self.gems.write().map_err(|_| poisoned())?;
        gems.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

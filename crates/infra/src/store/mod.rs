//! Storage contracts for accounts and gem listings.

use async_trait::async_trait;

use gemforge_auth::{Account, NewAccount};
use gemforge_catalog::{Gem, GemFilter};
use gemforge_core::{GemId, UserId};

use crate::error::StoreError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Lookup and registration of account records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register a new account. The backend assigns the id and creation
    /// timestamp and enforces username uniqueness
    /// ([`StoreError::UsernameTaken`] on conflict).
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, StoreError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;
}

/// Persistence for gem listings.
#[async_trait]
pub trait GemRepository: Send + Sync {
    async fn insert(&self, gem: Gem) -> Result<Gem, StoreError>;

    async fn get(&self, id: GemId) -> Result<Option<Gem>, StoreError>;

    /// List gems matching `filter`. When the filter restricts kinds, results
    /// are ordered by kind, then price descending.
    async fn list(&self, filter: &GemFilter) -> Result<Vec<Gem>, StoreError>;

    async fn list_by_seller(&self, seller_id: UserId) -> Result<Vec<Gem>, StoreError>;

    /// Replace the stored record for `gem.id`
    /// ([`StoreError::NotFound`] if absent).
    async fn update(&self, gem: Gem) -> Result<Gem, StoreError>;

    async fn delete(&self, id: GemId) -> Result<(), StoreError>;
}

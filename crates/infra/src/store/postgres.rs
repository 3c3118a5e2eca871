//! Postgres-backed store.
//!
//! ## Error mapping
//!
//! The `23505` unique-violation code on the accounts `username` column is
//! mapped to [`StoreError::UsernameTaken`]; everything else becomes
//! [`StoreError::Backend`]. Uniqueness lives in the schema, so concurrent
//! registrations of the same name race at the database, not in app code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use gemforge_auth::{Account, NewAccount};
use gemforge_catalog::{Gem, GemClarity, GemColor, GemFilter, GemProperties, GemType};
use gemforge_core::{GemId, UserId};

use crate::error::StoreError;
use crate::store::{GemRepository, UserDirectory};

const PG_UNIQUE_VIOLATION: &str = "23505";

/// Postgres backend implementing both storage contracts.
///
/// Thread-safe via the sqlx connection pool.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(StoreError::backend)?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                is_seller BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS gems (
                id UUID PRIMARY KEY,
                price DOUBLE PRECISION NOT NULL,
                available BOOLEAN NOT NULL,
                kind TEXT NOT NULL,
                seller_id UUID NOT NULL REFERENCES accounts(id),
                size DOUBLE PRECISION NOT NULL,
                clarity SMALLINT NOT NULL,
                color TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }
}

#[derive(Debug)]
struct AccountRow {
    id: uuid::Uuid,
    username: String,
    email: String,
    password_hash: String,
    is_seller: bool,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for AccountRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(AccountRow {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            is_seller: row.try_get("is_seller")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            is_seller: row.is_seller,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug)]
struct GemRow {
    id: uuid::Uuid,
    price: f64,
    available: bool,
    kind: String,
    seller_id: uuid::Uuid,
    size: f64,
    clarity: i16,
    color: Option<String>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for GemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(GemRow {
            id: row.try_get("id")?,
            price: row.try_get("price")?,
            available: row.try_get("available")?,
            kind: row.try_get("kind")?,
            seller_id: row.try_get("seller_id")?,
            size: row.try_get("size")?,
            clarity: row.try_get("clarity")?,
            color: row.try_get("color")?,
        })
    }
}

impl TryFrom<GemRow> for Gem {
    type Error = StoreError;

    fn try_from(row: GemRow) -> Result<Self, Self::Error> {
        let kind: GemType = row.kind.parse().map_err(StoreError::backend)?;
        let clarity = GemClarity::try_from(row.clarity as u8).map_err(StoreError::backend)?;
        let color = row
            .color
            .map(|c| c.parse::<GemColor>())
            .transpose()
            .map_err(StoreError::backend)?;

        Ok(Gem {
            id: GemId::from_uuid(row.id),
            price: row.price,
            available: row.available,
            kind,
            seller_id: UserId::from_uuid(row.seller_id),
            properties: GemProperties {
                size: row.size,
                clarity,
                color,
            },
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
    )
}

#[async_trait]
impl UserDirectory for PostgresStore {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let record = Account {
            id: UserId::new(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            is_seller: account.is_seller,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, is_seller, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.is_seller)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::UsernameTaken
            } else {
                StoreError::backend(e)
            }
        })?;

        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, email, password_hash, is_seller, created_at
             FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(Account::from))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, email, password_hash, is_seller, created_at
             FROM accounts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(Account::from))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, email, password_hash, is_seller, created_at
             FROM accounts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(Account::from).collect())
    }
}

#[async_trait]
impl GemRepository for PostgresStore {
    async fn insert(&self, gem: Gem) -> Result<Gem, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO gems (id, price, available, kind, seller_id, size, clarity, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(gem.id.as_uuid())
        .bind(gem.price)
        .bind(gem.available)
        .bind(gem.kind.as_str())
        .bind(gem.seller_id.as_uuid())
        .bind(gem.properties.size)
        .bind(gem.properties.clarity.grade() as i16)
        .bind(gem.properties.color.map(|c| c.as_str()))
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(gem)
    }

    async fn get(&self, id: GemId) -> Result<Option<Gem>, StoreError> {
        let row = sqlx::query_as::<_, GemRow>(
            "SELECT id, price, available, kind, seller_id, size, clarity, color
             FROM gems WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(Gem::try_from).transpose()
    }

    async fn list(&self, filter: &GemFilter) -> Result<Vec<Gem>, StoreError> {
        // Build the WHERE clause dynamically; bind order must match the
        // placeholder numbering below.
        let mut sql = String::from(
            "SELECT id, price, available, kind, seller_id, size, clarity, color
             FROM gems WHERE TRUE",
        );
        let mut arg = 0;
        if filter.price_lte.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND price <= ${arg}"));
        }
        if filter.price_gte.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND price >= ${arg}"));
        }
        if !filter.kinds.is_empty() {
            arg += 1;
            sql.push_str(&format!(" AND kind = ANY(${arg})"));
            sql.push_str(" ORDER BY kind, price DESC");
        } else {
            sql.push_str(" ORDER BY id");
        }

        let mut query = sqlx::query_as::<_, GemRow>(&sql);
        if let Some(lte) = filter.price_lte {
            query = query.bind(lte);
        }
        if let Some(gte) = filter.price_gte {
            query = query.bind(gte);
        }
        if !filter.kinds.is_empty() {
            let kinds: Vec<String> = filter.kinds.iter().map(|k| k.as_str().to_string()).collect();
            query = query.bind(kinds);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        rows.into_iter().map(Gem::try_from).collect()
    }

    async fn list_by_seller(&self, seller_id: UserId) -> Result<Vec<Gem>, StoreError> {
        let rows = sqlx::query_as::<_, GemRow>(
            "SELECT id, price, available, kind, seller_id, size, clarity, color
             FROM gems WHERE seller_id = $1 ORDER BY id",
        )
        .bind(seller_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.into_iter().map(Gem::try_from).collect()
    }

    async fn update(&self, gem: Gem) -> Result<Gem, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE gems
            SET price = $1, available = $2, kind = $3, size = $4, clarity = $5, color = $6
            WHERE id = $7
            "#,
        )
        .bind(gem.price)
        .bind(gem.available)
        .bind(gem.kind.as_str())
        .bind(gem.properties.size)
        .bind(gem.properties.clarity.grade() as i16)
        .bind(gem.properties.color.map(|c| c.as_str()))
        .bind(gem.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(gem)
    }

    async fn delete(&self, id: GemId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM gems WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

use thiserror::Error;

/// Storage-layer error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Registration conflict: the username already exists. Enforced at the
    /// storage level (write lock in memory, UNIQUE constraint in Postgres)
    /// so there is no check-then-insert race.
    #[error("username is taken")]
    UsernameTaken,

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// Backend failure (connection, decode, constraint other than the ones
    /// mapped above).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl core::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

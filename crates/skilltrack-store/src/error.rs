//! Error types for the skilltrack-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`]. At the
//! [`SkillRepository`](skilltrack_core::SkillRepository) boundary the error is
//! flattened into [`CoreError::Persistence`] so the core never sees SQLite
//! types.

use skilltrack_core::CoreError;
use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema migration failed.
    #[error("migration v{version} failed: {message}")]
    Migration { version: u32, message: String },

    /// The connection mutex was poisoned by a panicking holder.
    #[error("connection lock poisoned: {0}")]
    Lock(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Json(e) => CoreError::Json(e),
            other => CoreError::Persistence(other.to_string()),
        }
    }
}

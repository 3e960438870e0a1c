//! Store error model.

use thiserror::Error;

/// Result type used across the persistence layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-level error.
///
/// Domain failures (validation, not-found) are decided before the store is
/// called; everything surfacing here is a database-connectivity or integrity
/// failure and propagates uncaught to the boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

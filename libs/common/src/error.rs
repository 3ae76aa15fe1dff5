//! Custom error types for the common library
//!
//! This module defines the data-store error taxonomy shared by both
//! services. Empty results are surfaced as their own variant so callers can
//! tell "no such row" apart from transport or query failures.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for data-store operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// The query matched no rows
    #[error("Row not found")]
    NotFound,

    /// A write collided with a unique constraint
    #[error("Conflicting row: {0}")]
    Conflict(String),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a query error, keeping empty results and unique violations distinct
    pub fn from_query(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => DatabaseError::NotFound,
            SqlxError::Database(db) if db.is_unique_violation() => {
                DatabaseError::Conflict(db.message().to_string())
            }
            other => DatabaseError::Query(other),
        }
    }

    /// True when the error only means that nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

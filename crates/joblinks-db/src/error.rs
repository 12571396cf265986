//! Database error types.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Result type for repository operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A foreign key points at a row that does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A unique constraint was violated.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The row changed underneath an update.
    #[error("{0} was modified concurrently")]
    Conflict(&'static str),

    #[error("Database error: {0}")]
    Database(#[source] DbErr),
}

impl DbError {
    /// Classify an update that touched no rows once existence has been re-checked.
    pub fn missed_update(entity: &'static str, still_exists: bool) -> Self {
        if still_exists {
            Self::Conflict(entity)
        } else {
            Self::NotFound(entity)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Duplicate(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::InvalidReference(msg),
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missed_update_classification() {
        assert!(matches!(
            DbError::missed_update("Company", true),
            DbError::Conflict("Company")
        ));
        assert!(DbError::missed_update("Company", false).is_not_found());
    }

    #[test]
    fn test_plain_db_error_is_wrapped() {
        let err = DbError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DbError::Database(_)));
    }
}

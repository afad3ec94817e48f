//! Error handler for restaurant.

use sqlx::Error as SQLxError;
use thiserror::Error;

use crate::user::UnknownAccess;

pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing persistence errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error("expected {expected} row, database returned {actual}")]
    IncorrectResultSize { expected: usize, actual: usize },

    #[error("duplicate value on unique column `{column}`")]
    UniqueViolation { column: &'static str },

    #[error("user {id} not found")]
    NotFound { id: i32 },

    #[error(transparent)]
    DataFormat(#[from] UnknownAccess),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection failure, constraint violation, malformed statement or
    /// unexpected row count.
    DataAccess,
    /// Lookup by id matched zero rows.
    NotFound,
    /// Stored value does not map onto the model.
    DataFormat,
}

impl Error {
    /// Get the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Sql(_)
            | Error::IncorrectResultSize { .. }
            | Error::UniqueViolation { .. } => ErrorKind::DataAccess,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::DataFormat(_) => ErrorKind::DataFormat,
        }
    }

    /// Whether the error is a unique constraint violation, e.g. a duplicate
    /// login.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Sql(err) => err
                .as_database_error()
                .is_some_and(|e| e.is_unique_violation()),
            Error::UniqueViolation { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::Sql(SQLxError::PoolTimedOut).kind(),
            ErrorKind::DataAccess
        );
        assert_eq!(
            Error::IncorrectResultSize {
                expected: 1,
                actual: 2
            }
            .kind(),
            ErrorKind::DataAccess
        );
        assert_eq!(
            Error::UniqueViolation { column: "login" }.kind(),
            ErrorKind::DataAccess
        );
        assert_eq!(Error::NotFound { id: 7 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::from(UnknownAccess("chef".into())).kind(),
            ErrorKind::DataFormat
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(Error::NotFound { id: 7 }.to_string(), "user 7 not found");
        assert!(!Error::NotFound { id: 7 }.is_unique_violation());
        assert!(
            Error::UniqueViolation { column: "login" }.is_unique_violation()
        );
    }
}

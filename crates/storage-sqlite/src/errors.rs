//! Diesel and r2d2 failures, and how they surface as `piggybank_core` errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use piggybank_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Errors produced inside the SQLite layer. Never escapes the crate; every
/// repository method returns `piggybank_core::Result`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot open SQLite database: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("No pooled connection available: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("SQLite statement failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// A domain error raised inside a writer transaction. It is carried
    /// through the rollback untouched.
    #[error(transparent)]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("no matching row".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// True when the error is a unique-constraint violation. Repositories use it
/// to turn storage-level backstops into domain errors.
pub fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// `.into_core()` for raw Diesel and pool results.
pub trait IntoCore<T> {
    fn into_core(self) -> piggybank_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> piggybank_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> piggybank_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

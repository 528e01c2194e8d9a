//! SQLite storage implementation for PiggyBank.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `piggybank-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for users, couples, piggybanks, vouchers and actions
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!     storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod actions;
pub mod couples;
pub mod piggybanks;
pub mod users;
pub mod vouchers;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use actions::ActionRepository;
pub use couples::CoupleRepository;
pub use piggybanks::PiggyBankRepository;
pub use users::UserRepository;
pub use vouchers::VoucherRepository;

// Re-export from piggybank-core for convenience
pub use piggybank_core::errors::{DatabaseError, Error, Result};

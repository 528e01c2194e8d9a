//! PiggyBank Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the shared-savings backend:
//! accounts, couple pairing, savings goals, voucher templates and the action
//! ledger. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod actions;
pub mod couples;
pub mod email;
pub mod errors;
pub mod piggybanks;
pub mod users;
pub mod utils;
pub mod vouchers;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

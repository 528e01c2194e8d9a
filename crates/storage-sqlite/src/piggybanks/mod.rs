//! SQLite storage implementation for piggybanks.

mod model;
mod repository;

pub use model::{NewPiggyBankDB, PiggyBankDB, PiggyBankSummaryDB};
pub use repository::PiggyBankRepository;

//! PiggyBanks module - shared savings goals owned by a couple.

mod piggybanks_errors;
mod piggybanks_model;
mod piggybanks_service;
mod piggybanks_traits;


pub use piggybanks_errors::PiggyBankError;
pub use piggybanks_model::{CreatePiggyBank, NewPiggyBank, PiggyBank, PiggyBankSummary};
pub use piggybanks_service::PiggyBankService;
pub use piggybanks_traits::{PiggyBankRepositoryTrait, PiggyBankServiceTrait};

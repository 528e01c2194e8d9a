use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::piggybanks::piggybanks_model::{
    CreatePiggyBank, NewPiggyBank, PiggyBank, PiggyBankSummary,
};

/// Trait for piggybank repository operations
#[async_trait]
pub trait PiggyBankRepositoryTrait: Send + Sync {
    async fn create(&self, new_piggy_bank: NewPiggyBank) -> Result<PiggyBank>;

    /// Returns the goal only when it belongs to the user's couple.
    fn get_for_user(&self, piggy_bank_id: &str, user_id: &str) -> Result<Option<PiggyBank>>;

    /// Open goals of the user's couple, newest first, with counters.
    fn list_open_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<PiggyBankSummary>>;

    async fn close(&self, piggy_bank_id: &str, closed_at: DateTime<Utc>) -> Result<PiggyBank>;
}

/// Trait for piggybank service operations
#[async_trait]
pub trait PiggyBankServiceTrait: Send + Sync {
    async fn create_piggy_bank(&self, user_id: &str, input: CreatePiggyBank)
        -> Result<PiggyBank>;
    fn list_piggy_banks(&self, user_id: &str) -> Result<Vec<PiggyBankSummary>>;
    fn get_piggy_bank(&self, piggy_bank_id: &str, user_id: &str) -> Result<PiggyBank>;
    async fn close_piggy_bank(&self, piggy_bank_id: &str, user_id: &str) -> Result<()>;
}

use async_trait::async_trait;

use crate::actions::actions_model::{
    ActionEntry, ActionEntryGroup, CreateActionEntry, NewActionEntry, PiggyBankStats,
};
use crate::errors::Result;
use crate::vouchers::VoucherTemplate;

/// Trait for action entry repository operations
#[async_trait]
pub trait ActionRepositoryTrait: Send + Sync {
    async fn create(&self, new_entry: NewActionEntry) -> Result<ActionEntry>;

    /// Entries of one goal joined with their template, ordered by template
    /// creation then most recent occurrence first.
    fn list_by_piggy_bank(&self, piggy_bank_id: &str)
        -> Result<Vec<(ActionEntry, VoucherTemplate)>>;

    fn get_stats(&self, piggy_bank_id: &str) -> Result<PiggyBankStats>;
}

/// Trait for action entry service operations
#[async_trait]
pub trait ActionServiceTrait: Send + Sync {
    async fn create_action_entry(
        &self,
        user_id: &str,
        input: CreateActionEntry,
    ) -> Result<ActionEntry>;

    fn list_action_entries(
        &self,
        piggy_bank_id: &str,
        user_id: &str,
    ) -> Result<Vec<ActionEntryGroup>>;

    fn get_stats(&self, piggy_bank_id: &str, user_id: &str) -> Result<PiggyBankStats>;
}

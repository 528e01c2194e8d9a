use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use crate::actions::actions_errors::ActionError;
use crate::actions::actions_model::{
    group_by_template, ActionEntry, ActionEntryGroup, CreateActionEntry, NewActionEntry,
    PiggyBankStats,
};
use crate::actions::actions_traits::{ActionRepositoryTrait, ActionServiceTrait};
use crate::errors::Result;
use crate::piggybanks::PiggyBankRepositoryTrait;
use crate::utils::text_utils::clean_optional_text;
use crate::utils::time_utils::parse_rfc3339;
use crate::vouchers::VoucherRepositoryTrait;

pub struct ActionService {
    action_repo: Arc<dyn ActionRepositoryTrait>,
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
}

impl ActionService {
    pub fn new(
        action_repo: Arc<dyn ActionRepositoryTrait>,
        voucher_repo: Arc<dyn VoucherRepositoryTrait>,
        piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
    ) -> Self {
        Self {
            action_repo,
            voucher_repo,
            piggy_repo,
        }
    }

    fn ensure_access(&self, piggy_bank_id: &str, user_id: &str) -> Result<()> {
        match self.piggy_repo.get_for_user(piggy_bank_id, user_id)? {
            Some(_) => Ok(()),
            None => Err(ActionError::NotAuthorized.into()),
        }
    }
}

#[async_trait]
impl ActionServiceTrait for ActionService {
    async fn create_action_entry(
        &self,
        user_id: &str,
        input: CreateActionEntry,
    ) -> Result<ActionEntry> {
        let occurred_at = parse_rfc3339(&input.occurred_at)?;

        let template = self
            .voucher_repo
            .get_by_id(&input.voucher_template_id)?
            .ok_or(ActionError::VoucherTemplateNotFound)?;

        let piggy_bank = self
            .piggy_repo
            .get_for_user(&template.piggy_bank_id, user_id)?
            .ok_or(ActionError::NotAuthorized)?;
        if piggy_bank.has_ended(Utc::now()) {
            return Err(ActionError::PiggyBankEnded.into());
        }

        let entry = self
            .action_repo
            .create(NewActionEntry {
                voucher_template_id: template.id,
                giver_user_id: user_id.to_string(),
                occurred_at,
                notes: clean_optional_text(input.notes),
            })
            .await?;
        debug!("Recorded action {} on piggybank {}", entry.id, piggy_bank.id);
        Ok(entry)
    }

    fn list_action_entries(
        &self,
        piggy_bank_id: &str,
        user_id: &str,
    ) -> Result<Vec<ActionEntryGroup>> {
        self.ensure_access(piggy_bank_id, user_id)?;
        let rows = self.action_repo.list_by_piggy_bank(piggy_bank_id)?;
        Ok(group_by_template(rows))
    }

    fn get_stats(&self, piggy_bank_id: &str, user_id: &str) -> Result<PiggyBankStats> {
        self.ensure_access(piggy_bank_id, user_id)?;
        self.action_repo.get_stats(piggy_bank_id)
    }
}

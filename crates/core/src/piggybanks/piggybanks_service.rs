use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;

use crate::couples::CoupleRepositoryTrait;
use crate::errors::Result;
use crate::piggybanks::piggybanks_errors::PiggyBankError;
use crate::piggybanks::piggybanks_model::{
    CreatePiggyBank, NewPiggyBank, PiggyBank, PiggyBankSummary,
};
use crate::piggybanks::piggybanks_traits::{PiggyBankRepositoryTrait, PiggyBankServiceTrait};
use crate::utils::text_utils::clean_optional_text;
use crate::utils::time_utils::{parse_optional_rfc3339, parse_rfc3339};

pub struct PiggyBankService {
    piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
    couple_repo: Arc<dyn CoupleRepositoryTrait>,
}

impl PiggyBankService {
    pub fn new(
        piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
        couple_repo: Arc<dyn CoupleRepositoryTrait>,
    ) -> Self {
        Self {
            piggy_repo,
            couple_repo,
        }
    }
}

#[async_trait]
impl PiggyBankServiceTrait for PiggyBankService {
    async fn create_piggy_bank(
        &self,
        user_id: &str,
        input: CreatePiggyBank,
    ) -> Result<PiggyBank> {
        let couple = self
            .couple_repo
            .get_couple_by_user(user_id)?
            .ok_or(PiggyBankError::NotAuthorized)?;

        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(PiggyBankError::TitleRequired.into());
        }
        let start_date = parse_rfc3339(&input.start_date)?;
        let end_date = parse_optional_rfc3339(input.end_date.as_deref())?;

        self.piggy_repo
            .create(NewPiggyBank {
                couple_id: couple.id,
                title,
                description: clean_optional_text(input.description),
                start_date,
                end_date,
            })
            .await
    }

    fn list_piggy_banks(&self, user_id: &str) -> Result<Vec<PiggyBankSummary>> {
        self.piggy_repo.list_open_for_user(user_id, Utc::now())
    }

    fn get_piggy_bank(&self, piggy_bank_id: &str, user_id: &str) -> Result<PiggyBank> {
        self.piggy_repo
            .get_for_user(piggy_bank_id, user_id)?
            .ok_or_else(|| PiggyBankError::NotFound.into())
    }

    async fn close_piggy_bank(&self, piggy_bank_id: &str, user_id: &str) -> Result<()> {
        if self
            .piggy_repo
            .get_for_user(piggy_bank_id, user_id)?
            .is_none()
        {
            return Err(PiggyBankError::NotAuthorized.into());
        }

        self.piggy_repo.close(piggy_bank_id, Utc::now()).await?;
        info!("Closed piggybank {}", piggy_bank_id);
        Ok(())
    }
}

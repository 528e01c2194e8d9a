use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::piggybanks::PiggyBankRepositoryTrait;
use crate::utils::text_utils::clean_optional_text;
use crate::vouchers::vouchers_errors::VoucherError;
use crate::vouchers::vouchers_model::{CreateVoucherTemplate, NewVoucherTemplate, VoucherTemplate};
use crate::vouchers::vouchers_traits::{VoucherRepositoryTrait, VoucherServiceTrait};

pub struct VoucherService {
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
}

impl VoucherService {
    pub fn new(
        voucher_repo: Arc<dyn VoucherRepositoryTrait>,
        piggy_repo: Arc<dyn PiggyBankRepositoryTrait>,
    ) -> Self {
        Self {
            voucher_repo,
            piggy_repo,
        }
    }

    fn ensure_access(&self, piggy_bank_id: &str, user_id: &str) -> Result<()> {
        match self.piggy_repo.get_for_user(piggy_bank_id, user_id)? {
            Some(_) => Ok(()),
            None => Err(VoucherError::NotAuthorized.into()),
        }
    }
}

#[async_trait]
impl VoucherServiceTrait for VoucherService {
    async fn create_voucher_template(
        &self,
        user_id: &str,
        input: CreateVoucherTemplate,
    ) -> Result<VoucherTemplate> {
        if input.amount_cents <= 0 {
            return Err(VoucherError::NonPositiveAmount.into());
        }
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(VoucherError::TitleRequired.into());
        }

        self.ensure_access(&input.piggy_bank_id, user_id)?;

        self.voucher_repo
            .create(NewVoucherTemplate {
                piggy_bank_id: input.piggy_bank_id,
                title,
                description: clean_optional_text(input.description),
                amount_cents: input.amount_cents,
            })
            .await
    }

    fn list_voucher_templates(
        &self,
        piggy_bank_id: &str,
        user_id: &str,
    ) -> Result<Vec<VoucherTemplate>> {
        self.ensure_access(piggy_bank_id, user_id)?;
        self.voucher_repo.list_by_piggy_bank(piggy_bank_id)
    }
}

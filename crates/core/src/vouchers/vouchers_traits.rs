use async_trait::async_trait;

use crate::errors::Result;
use crate::vouchers::vouchers_model::{CreateVoucherTemplate, NewVoucherTemplate, VoucherTemplate};

/// Trait for voucher template repository operations
#[async_trait]
pub trait VoucherRepositoryTrait: Send + Sync {
    async fn create(&self, new_template: NewVoucherTemplate) -> Result<VoucherTemplate>;
    fn get_by_id(&self, template_id: &str) -> Result<Option<VoucherTemplate>>;
    /// Templates of one goal in creation order.
    fn list_by_piggy_bank(&self, piggy_bank_id: &str) -> Result<Vec<VoucherTemplate>>;
}

/// Trait for voucher template service operations
#[async_trait]
pub trait VoucherServiceTrait: Send + Sync {
    async fn create_voucher_template(
        &self,
        user_id: &str,
        input: CreateVoucherTemplate,
    ) -> Result<VoucherTemplate>;

    fn list_voucher_templates(
        &self,
        piggy_bank_id: &str,
        user_id: &str,
    ) -> Result<Vec<VoucherTemplate>>;
}

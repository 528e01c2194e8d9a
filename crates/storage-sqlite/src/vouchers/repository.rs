use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use piggybank_core::vouchers::{NewVoucherTemplate, VoucherRepositoryTrait, VoucherTemplate};
use piggybank_core::Result;

use super::model::{NewVoucherTemplateDB, VoucherTemplateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::voucher_templates;

pub struct VoucherRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VoucherRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        VoucherRepository { pool, writer }
    }
}

#[async_trait]
impl VoucherRepositoryTrait for VoucherRepository {
    async fn create(&self, new_template: NewVoucherTemplate) -> Result<VoucherTemplate> {
        let row = NewVoucherTemplateDB::from_domain(
            Uuid::new_v4().to_string(),
            new_template,
            Utc::now().naive_utc(),
        )?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VoucherTemplate> {
                let created = diesel::insert_into(voucher_templates::table)
                    .values(&row)
                    .returning(VoucherTemplateDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    fn get_by_id(&self, template_id: &str) -> Result<Option<VoucherTemplate>> {
        let mut conn = get_connection(&self.pool)?;
        let template = voucher_templates::table
            .find(template_id)
            .select(VoucherTemplateDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(template.map(VoucherTemplate::from))
    }

    fn list_by_piggy_bank(&self, piggy_bank_id: &str) -> Result<Vec<VoucherTemplate>> {
        let mut conn = get_connection(&self.pool)?;
        let templates = voucher_templates::table
            .filter(voucher_templates::piggybank_id.eq(piggy_bank_id))
            .order((
                voucher_templates::created_at.asc(),
                voucher_templates::id.asc(),
            ))
            .select(VoucherTemplateDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(templates.into_iter().map(VoucherTemplate::from).collect())
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use piggybank_core::actions::{ActionEntry, ActionRepositoryTrait, NewActionEntry, PiggyBankStats};
use piggybank_core::vouchers::VoucherTemplate;
use piggybank_core::Result;

use super::model::{ActionEntryDB, NewActionEntryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{action_entries, voucher_templates};
use crate::vouchers::VoucherTemplateDB;

pub struct ActionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ActionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ActionRepository { pool, writer }
    }
}

#[async_trait]
impl ActionRepositoryTrait for ActionRepository {
    async fn create(&self, new_entry: NewActionEntry) -> Result<ActionEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ActionEntry> {
                let now = Utc::now().naive_utc();
                let row = NewActionEntryDB {
                    id: Uuid::new_v4().to_string(),
                    voucher_template_id: new_entry.voucher_template_id,
                    giver_user_id: new_entry.giver_user_id,
                    occurred_at: new_entry.occurred_at.naive_utc(),
                    notes: new_entry.notes,
                    created_at: now,
                    updated_at: now,
                };

                let created = diesel::insert_into(action_entries::table)
                    .values(&row)
                    .returning(ActionEntryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    fn list_by_piggy_bank(
        &self,
        piggy_bank_id: &str,
    ) -> Result<Vec<(ActionEntry, VoucherTemplate)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = action_entries::table
            .inner_join(voucher_templates::table)
            .filter(voucher_templates::piggybank_id.eq(piggy_bank_id))
            .order((
                voucher_templates::created_at.asc(),
                voucher_templates::id.asc(),
                action_entries::occurred_at.desc(),
                action_entries::created_at.desc(),
            ))
            .select((ActionEntryDB::as_select(), VoucherTemplateDB::as_select()))
            .load::<(ActionEntryDB, VoucherTemplateDB)>(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .map(|(entry, template)| (entry.into(), template.into()))
            .collect())
    }

    fn get_stats(&self, piggy_bank_id: &str) -> Result<PiggyBankStats> {
        let mut conn = get_connection(&self.pool)?;
        let (total_actions, total_value) = action_entries::table
            .inner_join(voucher_templates::table)
            .filter(voucher_templates::piggybank_id.eq(piggy_bank_id))
            .select((count_star(), sum(voucher_templates::amount_cents)))
            .first::<(i64, Option<i64>)>(&mut conn)
            .into_core()?;

        Ok(PiggyBankStats {
            total_actions,
            total_value: total_value.unwrap_or(0),
        })
    }
}

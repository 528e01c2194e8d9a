use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Text, Timestamp};
use diesel::SqliteConnection;
use uuid::Uuid;

use piggybank_core::piggybanks::{
    NewPiggyBank, PiggyBank, PiggyBankError, PiggyBankRepositoryTrait, PiggyBankSummary,
};
use piggybank_core::{Error, Result};

use super::model::{NewPiggyBankDB, PiggyBankDB, PiggyBankSummaryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{couple_members, piggybanks};

const OPEN_PIGGY_BANKS_SQL: &str = r#"
    SELECT
        p.id, p.couple_id, p.title, p.description,
        p.start_date, p.end_date, p.created_at, p.updated_at,
        (SELECT COUNT(*) FROM voucher_templates vt
          WHERE vt.piggybank_id = p.id) AS voucher_templates_count,
        (SELECT COUNT(*) FROM action_entries ae
           JOIN voucher_templates vt ON vt.id = ae.voucher_template_id
          WHERE vt.piggybank_id = p.id) AS total_actions,
        (SELECT COALESCE(SUM(vt.amount_cents), 0) FROM action_entries ae
           JOIN voucher_templates vt ON vt.id = ae.voucher_template_id
          WHERE vt.piggybank_id = p.id) AS total_value
    FROM piggybanks p
    JOIN couple_members cm ON cm.couple_id = p.couple_id
    WHERE cm.user_id = ?1
      AND (p.end_date IS NULL OR p.end_date > ?2)
    ORDER BY p.created_at DESC, p.id
"#;

pub struct PiggyBankRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PiggyBankRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PiggyBankRepository { pool, writer }
    }
}

#[async_trait]
impl PiggyBankRepositoryTrait for PiggyBankRepository {
    async fn create(&self, new_piggy_bank: NewPiggyBank) -> Result<PiggyBank> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PiggyBank> {
                let now = Utc::now().naive_utc();
                let row = NewPiggyBankDB {
                    id: Uuid::new_v4().to_string(),
                    couple_id: new_piggy_bank.couple_id,
                    title: new_piggy_bank.title,
                    description: new_piggy_bank.description,
                    start_date: new_piggy_bank.start_date.naive_utc(),
                    end_date: new_piggy_bank.end_date.map(|d| d.naive_utc()),
                    created_at: now,
                    updated_at: now,
                };

                let created = diesel::insert_into(piggybanks::table)
                    .values(&row)
                    .returning(PiggyBankDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    fn get_for_user(&self, piggy_bank_id: &str, user_id: &str) -> Result<Option<PiggyBank>> {
        let mut conn = get_connection(&self.pool)?;
        let piggy_bank = piggybanks::table
            .inner_join(
                couple_members::table.on(couple_members::couple_id.eq(piggybanks::couple_id)),
            )
            .filter(piggybanks::id.eq(piggy_bank_id))
            .filter(couple_members::user_id.eq(user_id))
            .select(PiggyBankDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(piggy_bank.map(PiggyBank::from))
    }

    fn list_open_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<PiggyBankSummary>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = diesel::sql_query(OPEN_PIGGY_BANKS_SQL)
            .bind::<Text, _>(user_id)
            .bind::<Timestamp, _>(now.naive_utc())
            .load::<PiggyBankSummaryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PiggyBankSummary::from).collect())
    }

    async fn close(&self, piggy_bank_id: &str, closed_at: DateTime<Utc>) -> Result<PiggyBank> {
        let piggy_bank_id = piggy_bank_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PiggyBank> {
                let closed_at = closed_at.naive_utc();
                let closed = diesel::update(piggybanks::table.find(&piggy_bank_id))
                    .set((
                        piggybanks::end_date.eq(Some(closed_at)),
                        piggybanks::updated_at.eq(closed_at),
                    ))
                    .returning(PiggyBankDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::from(PiggyBankError::NotFound))?;
                Ok(closed.into())
            })
            .await
    }
}

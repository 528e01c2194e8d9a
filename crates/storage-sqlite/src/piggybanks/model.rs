//! Database models for piggybanks.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use piggybank_core::piggybanks::{PiggyBank, PiggyBankSummary};

#[derive(Queryable, QueryableByName, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::piggybanks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PiggyBankDB {
    pub id: String,
    pub couple_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::piggybanks)]
pub struct NewPiggyBankDB {
    pub id: String,
    pub couple_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Listing row: the goal plus counters computed in SQL.
#[derive(QueryableByName, Debug)]
pub struct PiggyBankSummaryDB {
    #[diesel(embed)]
    pub piggy_bank: PiggyBankDB,
    #[diesel(sql_type = BigInt)]
    pub voucher_templates_count: i64,
    #[diesel(sql_type = BigInt)]
    pub total_actions: i64,
    #[diesel(sql_type = BigInt)]
    pub total_value: i64,
}

impl From<PiggyBankDB> for PiggyBank {
    fn from(db: PiggyBankDB) -> Self {
        Self {
            id: db.id,
            couple_id: db.couple_id,
            title: db.title,
            description: db.description,
            start_date: db.start_date.and_utc(),
            end_date: db.end_date.map(|d| d.and_utc()),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<PiggyBankSummaryDB> for PiggyBankSummary {
    fn from(db: PiggyBankSummaryDB) -> Self {
        Self {
            piggy_bank: db.piggy_bank.into(),
            voucher_templates_count: db.voucher_templates_count,
            total_actions: db.total_actions,
            total_value: db.total_value,
        }
    }
}

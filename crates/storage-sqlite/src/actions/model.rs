//! Database models for action entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use piggybank_core::actions::ActionEntry;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::action_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ActionEntryDB {
    pub id: String,
    pub voucher_template_id: String,
    pub giver_user_id: String,
    pub occurred_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::action_entries)]
pub struct NewActionEntryDB {
    pub id: String,
    pub voucher_template_id: String,
    pub giver_user_id: String,
    pub occurred_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ActionEntryDB> for ActionEntry {
    fn from(db: ActionEntryDB) -> Self {
        Self {
            id: db.id,
            voucher_template_id: db.voucher_template_id,
            giver_user_id: db.giver_user_id,
            occurred_at: db.occurred_at.and_utc(),
            notes: db.notes,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

//! Database models for the pairing workflow.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use piggybank_core::couples::{Couple, CoupleRequest, CoupleStatus, CoupleTarget};
use piggybank_core::errors::{DatabaseError, Error};

/// Request row. Exactly one of `target_user_id` / `target_email` is set,
/// which the table's CHECK constraint enforces.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::couple_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CoupleRequestDB {
    pub id: String,
    pub requester_user_id: String,
    pub target_user_id: Option<String>,
    pub target_email: Option<String>,
    pub status: String,
    pub invitation_token: String,
    pub created_at: NaiveDateTime,
    pub responded_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::couple_requests)]
pub struct NewCoupleRequestDB {
    pub id: String,
    pub requester_user_id: String,
    pub target_user_id: Option<String>,
    pub target_email: Option<String>,
    pub status: String,
    pub invitation_token: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::couples)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CoupleDB {
    pub id: String,
    pub partner1_user_id: String,
    pub partner2_user_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::couple_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CoupleMemberDB {
    pub user_id: String,
    pub couple_id: String,
}

impl TryFrom<CoupleRequestDB> for CoupleRequest {
    type Error = Error;

    fn try_from(db: CoupleRequestDB) -> Result<Self, Self::Error> {
        let target = match (db.target_user_id, db.target_email) {
            (Some(user_id), None) => CoupleTarget::User(user_id),
            (None, Some(email)) => CoupleTarget::Email(email),
            _ => {
                return Err(Error::Database(DatabaseError::CorruptRecord(format!(
                    "couple request {} must target exactly one of user or email",
                    db.id
                ))))
            }
        };

        let status = db.status.parse::<CoupleStatus>().map_err(|_| {
            Error::Database(DatabaseError::CorruptRecord(format!(
                "couple request {} has unknown status {:?}",
                db.id, db.status
            )))
        })?;

        Ok(Self {
            status,
            id: db.id,
            requester_user_id: db.requester_user_id,
            target,
            invitation_token: db.invitation_token,
            created_at: db.created_at.and_utc(),
            responded_at: db.responded_at.map(|t| t.and_utc()),
        })
    }
}

impl From<CoupleDB> for Couple {
    fn from(db: CoupleDB) -> Self {
        Self {
            id: db.id,
            partner1_user_id: db.partner1_user_id,
            partner2_user_id: db.partner2_user_id,
            created_at: db.created_at.and_utc(),
        }
    }
}

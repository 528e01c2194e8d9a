//! Database models for voucher templates.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use piggybank_core::errors::{Error, ValidationError};
use piggybank_core::vouchers::{NewVoucherTemplate, VoucherTemplate};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::voucher_templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VoucherTemplateDB {
    pub id: String,
    pub piggybank_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::voucher_templates)]
pub struct NewVoucherTemplateDB {
    pub id: String,
    pub piggybank_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewVoucherTemplateDB {
    /// Amounts are stored as 32-bit integers; larger values are rejected.
    pub fn from_domain(
        id: String,
        template: NewVoucherTemplate,
        now: NaiveDateTime,
    ) -> Result<Self, Error> {
        let amount_cents = i32::try_from(template.amount_cents).map_err(|_| {
            ValidationError::InvalidInput(format!(
                "amountCents {} is out of range",
                template.amount_cents
            ))
        })?;

        Ok(Self {
            id,
            piggybank_id: template.piggy_bank_id,
            title: template.title,
            description: template.description,
            amount_cents,
            created_at: now,
            updated_at: now,
        })
    }
}

impl From<VoucherTemplateDB> for VoucherTemplate {
    fn from(db: VoucherTemplateDB) -> Self {
        Self {
            id: db.id,
            piggy_bank_id: db.piggybank_id,
            title: db.title,
            description: db.description,
            amount_cents: i64::from(db.amount_cents),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

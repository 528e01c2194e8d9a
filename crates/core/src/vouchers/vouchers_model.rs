use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reward with a fixed value in cents. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherTemplate {
    pub id: String,
    pub piggy_bank_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVoucherTemplate {
    pub piggy_bank_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherTemplate {
    pub piggy_bank_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i64,
}

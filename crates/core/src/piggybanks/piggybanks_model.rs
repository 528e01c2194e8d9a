//! PiggyBank domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A savings goal. Open while `end_date` is unset or in the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiggyBank {
    pub id: String,
    pub couple_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PiggyBank {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end <= now)
    }
}

/// Input model for persisting a new goal.
#[derive(Debug, Clone)]
pub struct NewPiggyBank {
    pub couple_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Creation payload; dates are RFC 3339 strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePiggyBank {
    pub title: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Goal listing row with counters computed by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PiggyBankSummary {
    #[serde(flatten)]
    pub piggy_bank: PiggyBank,
    pub voucher_templates_count: i64,
    pub total_actions: i64,
    pub total_value: i64,
}

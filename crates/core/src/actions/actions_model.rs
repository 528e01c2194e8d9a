//! Action ledger models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vouchers::VoucherTemplate;

/// One redemption of a voucher template. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub id: String,
    pub voucher_template_id: String,
    pub giver_user_id: String,
    pub occurred_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActionEntry {
    pub voucher_template_id: String,
    pub giver_user_id: String,
    pub occurred_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Creation payload; `occurred_at` is an RFC 3339 string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionEntry {
    pub voucher_template_id: String,
    pub occurred_at: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherTemplateSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount_cents: i64,
}

impl From<&VoucherTemplate> for VoucherTemplateSummary {
    fn from(template: &VoucherTemplate) -> Self {
        Self {
            id: template.id.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            amount_cents: template.amount_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntrySummary {
    pub id: String,
    pub giver_user_id: String,
    pub occurred_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActionEntry> for ActionEntrySummary {
    fn from(entry: ActionEntry) -> Self {
        Self {
            id: entry.id,
            giver_user_id: entry.giver_user_id,
            occurred_at: entry.occurred_at,
            notes: entry.notes,
            created_at: entry.created_at,
        }
    }
}

/// Entries of one goal grouped under their voucher template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntryGroup {
    pub voucher_template_id: String,
    pub voucher_template: VoucherTemplateSummary,
    pub entries: Vec<ActionEntrySummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiggyBankStats {
    pub total_actions: i64,
    /// Sum of template amounts, in cents.
    pub total_value: i64,
}

/// Groups `(entry, template)` rows by template, keeping the order in which
/// templates first appear and the row order within each group.
pub fn group_by_template(rows: Vec<(ActionEntry, VoucherTemplate)>) -> Vec<ActionEntryGroup> {
    let mut groups: Vec<ActionEntryGroup> = Vec::new();
    for (entry, template) in rows {
        match groups
            .iter_mut()
            .find(|g| g.voucher_template_id == template.id)
        {
            Some(group) => group.entries.push(entry.into()),
            None => groups.push(ActionEntryGroup {
                voucher_template_id: template.id.clone(),
                voucher_template: VoucherTemplateSummary::from(&template),
                entries: vec![entry.into()],
            }),
        }
    }
    groups
}

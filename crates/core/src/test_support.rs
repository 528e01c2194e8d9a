//! In-memory repositories and a recording mailer shared by the service tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::actions::{ActionEntry, ActionRepositoryTrait, NewActionEntry, PiggyBankStats};
use crate::couples::{
    Couple, CoupleError, CoupleRepositoryTrait, CoupleRequest, CoupleStatus, CoupleTarget,
    NewCoupleRequest,
};
use crate::email::InvitationMailer;
use crate::errors::{DatabaseError, Error, Result};
use crate::piggybanks::{NewPiggyBank, PiggyBank, PiggyBankRepositoryTrait, PiggyBankSummary};
use crate::users::{NewUser, User, UserRepositoryTrait};
use crate::vouchers::{NewVoucherTemplate, VoucherRepositoryTrait, VoucherTemplate};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    requests: Vec<CoupleRequest>,
    couples: Vec<Couple>,
    piggy_banks: Vec<PiggyBank>,
    templates: Vec<VoucherTemplate>,
    entries: Vec<ActionEntry>,
}

impl Tables {
    fn couple_of(&self, user_id: &str) -> Option<&Couple> {
        self.couples.iter().find(|c| c.has_member(user_id))
    }

    fn has_pending(&self, user_id: &str) -> bool {
        self.requests
            .iter()
            .any(|r| r.is_pending() && r.involves(user_id))
    }

    fn piggy_bank_for_user(&self, piggy_bank_id: &str, user_id: &str) -> Option<&PiggyBank> {
        let couple = self.couple_of(user_id)?;
        self.piggy_banks
            .iter()
            .find(|p| p.id == piggy_bank_id && p.couple_id == couple.id)
    }

    fn entries_for(&self, piggy_bank_id: &str) -> Vec<(ActionEntry, VoucherTemplate)> {
        let mut rows = Vec::new();
        for template in self
            .templates
            .iter()
            .filter(|t| t.piggy_bank_id == piggy_bank_id)
        {
            let mut entries: Vec<&ActionEntry> = self
                .entries
                .iter()
                .filter(|e| e.voucher_template_id == template.id)
                .collect();
            entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
            rows.extend(entries.into_iter().map(|e| (e.clone(), template.clone())));
        }
        rows
    }

    fn stats_for(&self, piggy_bank_id: &str) -> PiggyBankStats {
        let rows = self.entries_for(piggy_bank_id);
        PiggyBankStats {
            total_actions: rows.len() as i64,
            total_value: rows.iter().map(|(_, t)| t.amount_cents).sum(),
        }
    }
}

/// Single in-memory store implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_user(&self, email: &str, name: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn insert_couple(&self, partner1: &User, partner2: &User) -> Couple {
        let couple = Couple {
            id: Uuid::new_v4().to_string(),
            partner1_user_id: partner1.id.clone(),
            partner2_user_id: partner2.id.clone(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().couples.push(couple.clone());
        couple
    }

    pub fn insert_piggy_bank(&self, couple: &Couple, end_date: Option<DateTime<Utc>>) -> PiggyBank {
        let now = Utc::now();
        let piggy_bank = PiggyBank {
            id: Uuid::new_v4().to_string(),
            couple_id: couple.id.clone(),
            title: "Holiday".to_string(),
            description: None,
            start_date: now,
            end_date,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .piggy_banks
            .push(piggy_bank.clone());
        piggy_bank
    }

    pub fn insert_template(&self, piggy_bank: &PiggyBank, amount_cents: i64) -> VoucherTemplate {
        let now = Utc::now();
        let template = VoucherTemplate {
            id: Uuid::new_v4().to_string(),
            piggy_bank_id: piggy_bank.id.clone(),
            title: format!("Voucher {}", amount_cents),
            description: None,
            amount_cents,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().templates.push(template.clone());
        template
    }

    pub fn requests(&self) -> Vec<CoupleRequest> {
        self.tables.lock().unwrap().requests.clone()
    }

    pub fn couples(&self) -> Vec<Couple> {
        self.tables.lock().unwrap().couples.clone()
    }

    pub fn entries(&self) -> Vec<ActionEntry> {
        self.tables.lock().unwrap().entries.clone()
    }

    pub fn piggy_bank(&self, id: &str) -> Option<PiggyBank> {
        self.tables
            .lock()
            .unwrap()
            .piggy_banks
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(DatabaseError::UniqueViolation("users.email".to_string()).into());
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }
}

#[async_trait]
impl CoupleRepositoryTrait for MemoryStore {
    async fn create_request(&self, new_request: NewCoupleRequest) -> Result<CoupleRequest> {
        let mut tables = self.tables.lock().unwrap();
        let mut parties = vec![new_request.requester_user_id.as_str()];
        if let Some(target_id) = new_request.target.user_id() {
            parties.push(target_id);
        }
        if parties.iter().any(|id| tables.couple_of(id).is_some()) {
            return Err(CoupleError::AlreadyCoupled.into());
        }
        if parties.iter().any(|id| tables.has_pending(id)) {
            return Err(CoupleError::PendingRequestExists.into());
        }

        let request = CoupleRequest {
            id: Uuid::new_v4().to_string(),
            requester_user_id: new_request.requester_user_id,
            target: new_request.target,
            status: CoupleStatus::Pending,
            invitation_token: new_request.invitation_token,
            created_at: Utc::now(),
            responded_at: None,
        };
        tables.requests.push(request.clone());
        Ok(request)
    }

    fn get_request(&self, request_id: &str) -> Result<Option<CoupleRequest>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.requests.iter().find(|r| r.id == request_id).cloned())
    }

    fn get_request_by_invitation_token(&self, token: &str) -> Result<Option<CoupleRequest>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .requests
            .iter()
            .find(|r| r.invitation_token == token)
            .cloned())
    }

    fn find_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<CoupleRequest>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .requests
            .iter()
            .find(|r| r.is_pending() && r.involves(user_a) && r.involves(user_b))
            .cloned())
    }

    fn list_pending_requests_for_user(&self, user_id: &str) -> Result<Vec<CoupleRequest>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .requests
            .iter()
            .filter(|r| r.is_pending() && r.involves(user_id))
            .cloned()
            .collect())
    }

    fn get_couple_by_user(&self, user_id: &str) -> Result<Option<Couple>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.couple_of(user_id).cloned())
    }

    async fn accept_request(
        &self,
        request_id: &str,
        requester_user_id: &str,
        accepter_user_id: &str,
    ) -> Result<Couple> {
        let mut tables = self.tables.lock().unwrap();
        if tables.couple_of(requester_user_id).is_some()
            || tables.couple_of(accepter_user_id).is_some()
        {
            return Err(CoupleError::AlreadyCoupled.into());
        }
        let now = Utc::now();
        let request = tables
            .requests
            .iter_mut()
            .find(|r| r.id == request_id && r.is_pending())
            .ok_or(CoupleError::RequestNotPending)?;
        request.status = CoupleStatus::Accepted;
        request.responded_at = Some(now);

        let couple = Couple {
            id: Uuid::new_v4().to_string(),
            partner1_user_id: requester_user_id.to_string(),
            partner2_user_id: accepter_user_id.to_string(),
            created_at: now,
        };
        tables.couples.push(couple.clone());
        Ok(couple)
    }

    async fn bind_request_target(&self, request_id: &str, user_id: &str) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let request = tables
            .requests
            .iter_mut()
            .find(|r| r.id == request_id && r.target.user_id().is_none())
            .ok_or(CoupleError::InvitationAlreadyClaimed)?;
        request.target = CoupleTarget::User(user_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl PiggyBankRepositoryTrait for MemoryStore {
    async fn create(&self, new_piggy_bank: NewPiggyBank) -> Result<PiggyBank> {
        let now = Utc::now();
        let piggy_bank = PiggyBank {
            id: Uuid::new_v4().to_string(),
            couple_id: new_piggy_bank.couple_id,
            title: new_piggy_bank.title,
            description: new_piggy_bank.description,
            start_date: new_piggy_bank.start_date,
            end_date: new_piggy_bank.end_date,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .piggy_banks
            .push(piggy_bank.clone());
        Ok(piggy_bank)
    }

    fn get_for_user(&self, piggy_bank_id: &str, user_id: &str) -> Result<Option<PiggyBank>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.piggy_bank_for_user(piggy_bank_id, user_id).cloned())
    }

    fn list_open_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<PiggyBankSummary>> {
        let tables = self.tables.lock().unwrap();
        let Some(couple) = tables.couple_of(user_id) else {
            return Ok(Vec::new());
        };
        let mut summaries: Vec<PiggyBankSummary> = tables
            .piggy_banks
            .iter()
            .filter(|p| p.couple_id == couple.id && !p.has_ended(now))
            .map(|p| {
                let stats = tables.stats_for(&p.id);
                PiggyBankSummary {
                    piggy_bank: p.clone(),
                    voucher_templates_count: tables
                        .templates
                        .iter()
                        .filter(|t| t.piggy_bank_id == p.id)
                        .count() as i64,
                    total_actions: stats.total_actions,
                    total_value: stats.total_value,
                }
            })
            .collect();
        summaries.sort_by(|a, b| b.piggy_bank.created_at.cmp(&a.piggy_bank.created_at));
        Ok(summaries)
    }

    async fn close(&self, piggy_bank_id: &str, closed_at: DateTime<Utc>) -> Result<PiggyBank> {
        let mut tables = self.tables.lock().unwrap();
        let piggy_bank = tables
            .piggy_banks
            .iter_mut()
            .find(|p| p.id == piggy_bank_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(piggy_bank_id.to_string())))?;
        piggy_bank.end_date = Some(closed_at);
        piggy_bank.updated_at = closed_at;
        Ok(piggy_bank.clone())
    }
}

#[async_trait]
impl VoucherRepositoryTrait for MemoryStore {
    async fn create(&self, new_template: NewVoucherTemplate) -> Result<VoucherTemplate> {
        let now = Utc::now();
        let template = VoucherTemplate {
            id: Uuid::new_v4().to_string(),
            piggy_bank_id: new_template.piggy_bank_id,
            title: new_template.title,
            description: new_template.description,
            amount_cents: new_template.amount_cents,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().templates.push(template.clone());
        Ok(template)
    }

    fn get_by_id(&self, template_id: &str) -> Result<Option<VoucherTemplate>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.templates.iter().find(|t| t.id == template_id).cloned())
    }

    fn list_by_piggy_bank(&self, piggy_bank_id: &str) -> Result<Vec<VoucherTemplate>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .templates
            .iter()
            .filter(|t| t.piggy_bank_id == piggy_bank_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ActionRepositoryTrait for MemoryStore {
    async fn create(&self, new_entry: NewActionEntry) -> Result<ActionEntry> {
        let now = Utc::now();
        let entry = ActionEntry {
            id: Uuid::new_v4().to_string(),
            voucher_template_id: new_entry.voucher_template_id,
            giver_user_id: new_entry.giver_user_id,
            occurred_at: new_entry.occurred_at,
            notes: new_entry.notes,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().entries.push(entry.clone());
        Ok(entry)
    }

    fn list_by_piggy_bank(
        &self,
        piggy_bank_id: &str,
    ) -> Result<Vec<(ActionEntry, VoucherTemplate)>> {
        Ok(self.tables.lock().unwrap().entries_for(piggy_bank_id))
    }

    fn get_stats(&self, piggy_bank_id: &str) -> Result<PiggyBankStats> {
        Ok(self.tables.lock().unwrap().stats_for(piggy_bank_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentInvitation {
    pub to: String,
    pub inviter_name: String,
    pub token: String,
}

/// Mailer that records every invitation; optionally fails each send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentInvitation>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<SentInvitation> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits for the detached dispatch task to record `count` sends.
    pub async fn wait_for(&self, count: usize) -> Vec<SentInvitation> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl InvitationMailer for RecordingMailer {
    async fn send_invitation(&self, to: &str, inviter_name: &str, token: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentInvitation {
            to: to.to_string(),
            inviter_name: inviter_name.to_string(),
            token: token.to_string(),
        });
        if self.fail {
            return Err(Error::Email("relay refused connection".to_string()));
        }
        Ok(())
    }
}

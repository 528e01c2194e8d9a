//! Pairing domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::users::UserSummary;

const INVITATION_TOKEN_BYTES: usize = 32;

/// Lifecycle of a couple request. Only `Pending` is non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoupleStatus {
    Pending,
    Accepted,
    Rejected,
}

impl CoupleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoupleStatus::Pending => "pending",
            CoupleStatus::Accepted => "accepted",
            CoupleStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CoupleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoupleStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CoupleStatus::Pending),
            "accepted" => Ok(CoupleStatus::Accepted),
            "rejected" => Ok(CoupleStatus::Rejected),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown couple request status '{}'",
                other
            )))),
        }
    }
}

/// Who a request is addressed to.
///
/// A partner without an account is addressed by email until they register
/// through the invitation link, at which point the request is rebound to
/// their user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoupleTarget {
    User(String),
    Email(String),
}

impl CoupleTarget {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            CoupleTarget::User(id) => Some(id),
            CoupleTarget::Email(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            CoupleTarget::User(_) => None,
            CoupleTarget::Email(email) => Some(email),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoupleRequest {
    pub id: String,
    pub requester_user_id: String,
    pub target: CoupleTarget,
    pub status: CoupleStatus,
    pub invitation_token: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl CoupleRequest {
    pub fn is_pending(&self) -> bool {
        self.status == CoupleStatus::Pending
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.requester_user_id == user_id || self.target.user_id() == Some(user_id)
    }
}

/// Input model for persisting a new pending request.
#[derive(Debug, Clone)]
pub struct NewCoupleRequest {
    pub requester_user_id: String,
    pub target: CoupleTarget,
    pub invitation_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Couple {
    pub id: String,
    pub partner1_user_id: String,
    pub partner2_user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Couple {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.partner1_user_id == user_id || self.partner2_user_id == user_id
    }

    /// Returns the other member's id. Callers must pass a member of this couple.
    pub fn partner_of(&self, user_id: &str) -> &str {
        if self.partner1_user_id == user_id {
            &self.partner2_user_id
        } else {
            &self.partner1_user_id
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    Incoming,
    Outgoing,
}

/// A request as seen by one of its parties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: String,
    pub direction: RequestDirection,
    pub status: CoupleStatus,
    pub partner: UserSummary,
    pub created_at: DateTime<Utc>,
}

/// A couple as seen by one of its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleView {
    pub id: String,
    pub partner: UserSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleStatusView {
    pub couple: Option<CoupleView>,
    pub incoming: Vec<RequestView>,
    pub outgoing: Vec<RequestView>,
}

/// Registration payload carrying the token from an invitation link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWithInvitation {
    pub email: String,
    pub password: String,
    pub name: String,
    pub invitation_token: String,
}

/// 32 random bytes, hex encoded.
pub fn generate_invitation_token() -> String {
    let mut bytes = [0u8; INVITATION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

//! Outbound email seam used by the pairing workflow.

use async_trait::async_trait;

use crate::errors::Result;

/// Delivers invitation messages to prospective partners.
#[async_trait]
pub trait InvitationMailer: Send + Sync {
    async fn send_invitation(&self, to: &str, inviter_name: &str, token: &str) -> Result<()>;
}

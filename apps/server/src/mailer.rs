//! SMTP delivery of couple invitations.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use piggybank_core::email::InvitationMailer;
use piggybank_core::errors::{Error as CoreError, Result as CoreResult};

use crate::config::SmtpConfig;

const SUBJECT: &str = "PiggyBank Couple Invitation";
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    base_url: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, base_url: &str) -> anyhow::Result<Self> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn invitation_link(base_url: &str, token: &str, email: &str) -> String {
    format!(
        "{base_url}/register?invitationToken={}&email={}",
        urlencoding::encode(token),
        urlencoding::encode(email)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn invitation_html(inviter_name: &str, link: &str) -> String {
    let inviter_name = html_escape(inviter_name);
    let link = html_escape(link);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>{SUBJECT}</title></head>
<body style="font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto;">
    <h1>PiggyBank</h1>
    <p>Hello!</p>
    <p><strong>{inviter_name}</strong> has invited you to join their PiggyBank couple.</p>
    <p>Create shared savings goals, track progress together and celebrate with vouchers.</p>
    <p><a href="{link}">Accept Invitation</a></p>
    <p>If the link doesn't work, copy and paste this address into your browser:</p>
    <p>{link}</p>
    <p style="font-size: 12px; color: #666;">If you didn't expect this invitation, you can safely ignore this email.</p>
</body>
</html>"#
    )
}

#[async_trait]
impl InvitationMailer for SmtpMailer {
    async fn send_invitation(&self, to: &str, inviter_name: &str, token: &str) -> CoreResult<()> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| CoreError::Email(format!("invalid recipient {to}: {e}")))?;
        let link = invitation_link(&self.base_url, token, to);

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(invitation_html(inviter_name, &link))
            .map_err(|e| CoreError::Email(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| CoreError::Email(e.to_string()))?;
        Ok(())
    }
}

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

/// Outbound SMTP settings. Present only when host and username are configured.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub smtp: Option<SmtpConfig>,
    pub invite_base_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("PB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid PB_LISTEN_ADDR")?;
        let db_path = env_or("PB_DB_PATH", "./db/piggybank.db");
        let cors_allow = env_or("PB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("PB_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid PB_REQUEST_TIMEOUT_MS")?;

        let raw_secret = std::env::var("PB_JWT_SECRET").context("PB_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&raw_secret)?;
        let ttl_secs: u64 = env_or("PB_JWT_TTL_SECS", "604800")
            .parse()
            .context("Invalid PB_JWT_TTL_SECS")?;

        let smtp = match (env_opt("PB_SMTP_HOST"), env_opt("PB_SMTP_USERNAME")) {
            (Some(host), Some(username)) => Some(SmtpConfig {
                host,
                port: env_or("PB_SMTP_PORT", "587")
                    .parse()
                    .context("Invalid PB_SMTP_PORT")?,
                from: env_opt("PB_SMTP_FROM").unwrap_or_else(|| username.clone()),
                password: env_or("PB_SMTP_PASSWORD", ""),
                username,
            }),
            _ => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            smtp,
            invite_base_url: env_or("PB_INVITE_BASE_URL", "http://localhost:8081"),
        })
    }
}

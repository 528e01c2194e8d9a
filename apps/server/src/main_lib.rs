use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use piggybank_core::{
    actions::{ActionService, ActionServiceTrait},
    couples::{CoupleService, CoupleServiceTrait},
    email::InvitationMailer,
    piggybanks::{PiggyBankService, PiggyBankServiceTrait},
    users::{UserService, UserServiceTrait},
    vouchers::{VoucherService, VoucherServiceTrait},
};
use piggybank_storage_sqlite::{
    db::{self, write_actor},
    ActionRepository, CoupleRepository, PiggyBankRepository, UserRepository, VoucherRepository,
};

use crate::{auth::AuthManager, config::Config, mailer::SmtpMailer};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub couple_service: Arc<dyn CoupleServiceTrait>,
    pub piggy_bank_service: Arc<dyn PiggyBankServiceTrait>,
    pub voucher_service: Arc<dyn VoucherServiceTrait>,
    pub action_service: Arc<dyn ActionServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let mailer: Option<Arc<dyn InvitationMailer>> = match &config.smtp {
        Some(smtp) => {
            tracing::info!("Invitation emails enabled via {}:{}", smtp.host, smtp.port);
            Some(Arc::new(SmtpMailer::new(smtp, &config.invite_base_url)?))
        }
        None => {
            tracing::warn!("SMTP not configured; invitation emails are disabled");
            None
        }
    };
    build_state_with_mailer(config, mailer).await
}

/// Wires storage and services around the given invitation mailer.
pub async fn build_state_with_mailer(
    config: &Config,
    mailer: Option<Arc<dyn InvitationMailer>>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let couple_repo = Arc::new(CoupleRepository::new(pool.clone(), writer.clone()));
    let piggy_repo = Arc::new(PiggyBankRepository::new(pool.clone(), writer.clone()));
    let voucher_repo = Arc::new(VoucherRepository::new(pool.clone(), writer.clone()));
    let action_repo = Arc::new(ActionRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(user_repo));
    let couple_service = Arc::new(CoupleService::new(
        couple_repo.clone(),
        user_service.clone(),
        mailer,
    ));
    let piggy_bank_service = Arc::new(PiggyBankService::new(
        piggy_repo.clone(),
        couple_repo,
    ));
    let voucher_service = Arc::new(VoucherService::new(
        voucher_repo.clone(),
        piggy_repo.clone(),
    ));
    let action_service = Arc::new(ActionService::new(action_repo, voucher_repo, piggy_repo));

    Ok(Arc::new(AppState {
        user_service,
        couple_service,
        piggy_bank_service,
        voucher_service,
        action_service,
        auth: Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl)),
    }))
}

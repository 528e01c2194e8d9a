//! Temp-file database with every repository wired to one writer.

use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use piggybank_core::couples::{Couple, CoupleRepositoryTrait, CoupleTarget, NewCoupleRequest};
use piggybank_core::users::{NewUser, User, UserRepositoryTrait};

use crate::actions::ActionRepository;
use crate::couples::CoupleRepository;
use crate::db::{create_pool, run_migrations, spawn_writer};
use crate::piggybanks::PiggyBankRepository;
use crate::users::UserRepository;
use crate::vouchers::VoucherRepository;

pub(crate) struct TestDb {
    pub users: UserRepository,
    pub couples: CoupleRepository,
    pub piggy_banks: PiggyBankRepository,
    pub vouchers: VoucherRepository,
    pub actions: ActionRepository,
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = dir.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        TestDb {
            users: UserRepository::new(Arc::clone(&pool), writer.clone()),
            couples: CoupleRepository::new(Arc::clone(&pool), writer.clone()),
            piggy_banks: PiggyBankRepository::new(Arc::clone(&pool), writer.clone()),
            vouchers: VoucherRepository::new(Arc::clone(&pool), writer.clone()),
            actions: ActionRepository::new(pool, writer),
            _dir: dir,
        }
    }

    pub async fn user(&self, email: &str) -> User {
        self.users
            .create_user(NewUser {
                email: email.to_string(),
                name: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("Failed to create user")
    }

    /// Registers two users and pairs them through an accepted request.
    pub async fn couple(&self, first: &str, second: &str) -> (User, User, Couple) {
        let a = self.user(first).await;
        let b = self.user(second).await;
        let request = self
            .couples
            .create_request(NewCoupleRequest {
                requester_user_id: a.id.clone(),
                target: CoupleTarget::User(b.id.clone()),
                invitation_token: Uuid::new_v4().simple().to_string(),
            })
            .await
            .expect("Failed to create request");
        let couple = self
            .couples
            .accept_request(&request.id, &a.id, &b.id)
            .await
            .expect("Failed to accept request");
        (a, b, couple)
    }
}

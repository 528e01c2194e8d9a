use std::sync::{Arc, LazyLock};

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use log::debug;
use rand::rngs::OsRng;
use regex::Regex;

use crate::errors::Result;
use crate::users::users_errors::UserError;
use crate::users::users_model::{NewUser, RegisterUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s@<>(),;:"\[\]]+@[^\s@<>(),;:"\[\]]+$"#).expect("Invalid email regex")
});

/// Canonical form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn validate_email(email: &str) -> std::result::Result<(), UserError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(UserError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(UserError::InvalidEmail);
    }
    Ok(())
}

fn hash_password(password: &str) -> std::result::Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(candidate: &str, stored_hash: &str) -> std::result::Result<(), UserError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => UserError::InvalidCredentials,
            other => UserError::PasswordHash(other.to_string()),
        })
}

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, input: RegisterUser) -> Result<User> {
        validate_email(&input.email)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserError::PasswordTooShort.into());
        }

        let email = normalize_email(&input.email);
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(UserError::NameRequired.into());
        }

        if self.user_repo.get_by_email(&email)?.is_some() {
            return Err(UserError::EmailAlreadyRegistered.into());
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .user_repo
            .create_user(NewUser {
                email,
                name,
                password_hash,
            })
            .await?;
        debug!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        if validate_email(email).is_err() {
            return Err(UserError::InvalidCredentials.into());
        }

        let user = self
            .user_repo
            .get_by_email(&normalize_email(email))?
            .ok_or(UserError::InvalidCredentials)?;
        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repo
            .get_by_id(user_id)?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()).into())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo.get_by_email(&normalize_email(email))
    }
}

use crate::errors::Result;
use crate::users::users_model::{NewUser, RegisterUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    /// Lookup is case-insensitive; callers pass normalised addresses.
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, input: RegisterUser) -> Result<User>;
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use piggybank_core::users::{NewUser, User, UserError, UserRepositoryTrait};
use piggybank_core::{Error, Result};

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{is_unique_violation, IntoCore, StorageError};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let row = NewUserDB {
                    id: Uuid::new_v4().to_string(),
                    email: new_user.email,
                    name: new_user.name,
                    password_hash: new_user.password_hash,
                    created_at: now,
                    updated_at: now,
                };

                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            Error::from(UserError::EmailAlreadyRegistered)
                        } else {
                            StorageError::from(e).into()
                        }
                    })?;
                Ok(User::from(created))
            })
            .await
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDb;

    #[tokio::test]
    async fn create_and_look_up_user() {
        let db = TestDb::new();
        let created = db.user("alice@example.com").await;

        let by_id = db.users.get_by_id(&created.id).unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");
        assert_eq!(by_id.password_hash, "hash");

        let by_email = db.users.get_by_email("ALICE@example.com").unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
        assert!(db.users.get_by_id("missing").unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = TestDb::new();
        db.user("bob@example.com").await;

        let err = db
            .users
            .create_user(NewUser {
                email: "Bob@Example.com".to_string(),
                name: "Bob again".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::User(UserError::EmailAlreadyRegistered)
        ));
    }
}

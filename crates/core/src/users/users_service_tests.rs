#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::errors::Error;
    use crate::test_support::MemoryStore;
    use crate::users::{
        is_valid_email, normalize_email, RegisterUser, UserError, UserService, UserServiceTrait,
    };

    fn service() -> (Arc<MemoryStore>, UserService) {
        let store = MemoryStore::new();
        let service = UserService::new(store.clone());
        (store, service)
    }

    fn registration(email: &str, password: &str, name: &str) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    fn user_error(err: Error) -> UserError {
        match err {
            Error::User(e) => e,
            other => panic!("expected user error, got {:?}", other),
        }
    }

    #[test]
    fn email_helpers() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[tokio::test]
    async fn register_normalises_and_hashes() {
        let (_store, service) = service();
        let user = service
            .register(registration(" Alice@Example.com ", "password123", "  Alice "))
            .await
            .unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.name, "Alice");
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn register_validates_input() {
        let (_store, service) = service();

        let cases = [
            (registration("", "password123", "A"), UserError::EmailRequired),
            (
                registration("nope", "password123", "A"),
                UserError::InvalidEmail,
            ),
            (
                registration("a@example.com", "short", "A"),
                UserError::PasswordTooShort,
            ),
            (
                registration("a@example.com", "password123", "   "),
                UserError::NameRequired,
            ),
        ];
        for (input, expected) in cases {
            let err = service.register(input).await.unwrap_err();
            assert_eq!(user_error(err), expected);
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_case_insensitively() {
        let (_store, service) = service();
        service
            .register(registration("bob@example.com", "password123", "Bob"))
            .await
            .unwrap();

        let err = service
            .register(registration("BOB@example.com", "password456", "Bobby"))
            .await
            .unwrap_err();
        assert_eq!(user_error(err), UserError::EmailAlreadyRegistered);
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let (_store, service) = service();
        let registered = service
            .register(registration("carol@example.com", "correct-horse", "Carol"))
            .await
            .unwrap();

        let user = service
            .authenticate("CAROL@example.com", "correct-horse")
            .unwrap();
        assert_eq!(user.id, registered.id);

        let wrong = service
            .authenticate("carol@example.com", "battery-staple")
            .unwrap_err();
        assert_eq!(user_error(wrong), UserError::InvalidCredentials);

        let unknown = service
            .authenticate("dave@example.com", "correct-horse")
            .unwrap_err();
        assert_eq!(user_error(unknown), UserError::InvalidCredentials);

        let malformed = service.authenticate("carol", "correct-horse").unwrap_err();
        assert_eq!(user_error(malformed), UserError::InvalidCredentials);
    }

    #[tokio::test]
    async fn get_user_reports_missing_accounts() {
        let (store, service) = service();
        let existing = store.insert_user("erin@example.com", "Erin");

        assert_eq!(service.get_user(&existing.id).unwrap().email, existing.email);
        assert!(matches!(
            service.get_user("missing").unwrap_err(),
            Error::User(UserError::NotFound(_))
        ));
        assert!(service
            .find_by_email(" ERIN@example.com")
            .unwrap()
            .is_some());
    }

    #[test]
    fn serialized_user_never_exposes_password_hash() {
        let (store, _) = service();
        let user = store.insert_user("fay@example.com", "Fay");

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "fay@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("createdAt").is_some());
    }
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rand::{rngs::OsRng, RngCore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use piggybank_core::email::InvitationMailer;
use piggybank_core::Result as CoreResult;
use piggybank_server::{api::app_router, build_state, build_state_with_mailer, config::Config};

/// Keeps every invitation in memory: `(to, inviter_name, token)`.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Dispatch happens on a detached task, so poll briefly.
    pub async fn wait_for(&self, count: usize) -> Vec<(String, String, String)> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait::async_trait]
impl InvitationMailer for CapturingMailer {
    async fn send_invitation(&self, to: &str, inviter_name: &str, token: &str) -> CoreResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), inviter_name.to_string(), token.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: secret,
        token_ttl: Duration::from_secs(3600),
        smtp: None,
        invite_base_url: "http://localhost:8081".to_string(),
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let state = build_state(&config).await.unwrap();
        TestApp {
            router: app_router(state, &config),
            _dir: dir,
        }
    }

    pub async fn with_mailer(mailer: Arc<CapturingMailer>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let state = build_state_with_mailer(&config, Some(mailer as Arc<dyn InvitationMailer>))
            .await
            .unwrap();
        TestApp {
            router: app_router(state, &config),
            _dir: dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Registers an account and returns `(token, user_id)`.
    pub async fn register(&self, email: &str, name: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/auth/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": "password123",
                    "name": name,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Registers two users and pairs them. Returns both tokens.
    pub async fn couple(&self, first: &str, second: &str) -> (String, String) {
        let (first_token, _) = self.register(first, "First").await;
        let (second_token, _) = self.register(second, "Second").await;

        let (status, request) = self
            .post(
                "/couples/request",
                &first_token,
                serde_json::json!({ "partnerEmail": second }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{request}");

        let (status, body) = self
            .post(
                "/couples/accept",
                &second_token,
                serde_json::json!({ "requestId": request["id"] }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (first_token, second_token)
    }
}

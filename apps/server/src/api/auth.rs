use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use piggybank_core::couples::RegisterWithInvitation;
use piggybank_core::users::{RegisterUser, User};

use super::ApiJson;
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct AuthResponse {
    token: String,
    user: User,
}

fn auth_response(state: &AppState, user: User) -> ApiResult<Json<AuthResponse>> {
    let token = state.auth.issue_token(&user.id)?;
    Ok(Json(AuthResponse { token, user }))
}

async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterUser>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let user = state.user_service.register(payload).await?;
    tracing::info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, auth_response(&state, user)?))
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)?;
    auth_response(&state, user)
}

async fn register_with_invitation(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterWithInvitation>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let user = state.couple_service.register_with_invitation(payload).await?;
    tracing::info!("Registered invited user {}", user.id);
    Ok((StatusCode::CREATED, auth_response(&state, user)?))
}

async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route(
            "/auth/register-with-invitation",
            post(register_with_invitation),
        )
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

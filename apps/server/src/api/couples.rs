use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use piggybank_core::couples::{CoupleStatusView, CoupleView, RequestView};

use super::{parse_id, ApiJson};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoupleRequestBody {
    partner_email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestIdBody {
    request_id: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn request_couple(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(body): ApiJson<CoupleRequestBody>,
) -> ApiResult<(StatusCode, Json<RequestView>)> {
    let view = state
        .couple_service
        .request_couple(&user.id, &body.partner_email)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn accept_couple(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(body): ApiJson<RequestIdBody>,
) -> ApiResult<Json<CoupleView>> {
    let request_id = parse_id(&body.request_id, "requestId")?;
    let view = state
        .couple_service
        .accept_couple(&request_id, &user.id)
        .await?;
    Ok(Json(view))
}

async fn resend_couple(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(body): ApiJson<RequestIdBody>,
) -> ApiResult<Json<MessageResponse>> {
    let request_id = parse_id(&body.request_id, "requestId")?;
    state
        .couple_service
        .resend_couple(&request_id, &user.id)
        .await?;
    Ok(Json(MessageResponse {
        message: "invitation resent",
    }))
}

async fn couple_status(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<CoupleStatusView>> {
    Ok(Json(state.couple_service.get_status(&user.id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/couples/request", post(request_couple))
        .route("/couples/accept", post(accept_couple))
        .route("/couples/resend", post(resend_couple))
        .route("/couples/me", get(couple_status))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use piggybank_core::piggybanks::{CreatePiggyBank, PiggyBank, PiggyBankSummary};

use super::{parse_id, ApiJson};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn create_piggy_bank(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<CreatePiggyBank>,
) -> ApiResult<(StatusCode, Json<PiggyBank>)> {
    let created = state
        .piggy_bank_service
        .create_piggy_bank(&user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_piggy_banks(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<PiggyBankSummary>>> {
    Ok(Json(state.piggy_bank_service.list_piggy_banks(&user.id)?))
}

async fn get_piggy_bank(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<PiggyBank>> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.piggy_bank_service.get_piggy_bank(&id, &user.id)?))
}

async fn close_piggy_bank(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "id")?;
    state
        .piggy_bank_service
        .close_piggy_bank(&id, &user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/piggybanks", get(list_piggy_banks).post(create_piggy_bank))
        .route("/piggybanks/{id}", get(get_piggy_bank))
        .route("/piggybanks/{id}/close", post(close_piggy_bank))
}

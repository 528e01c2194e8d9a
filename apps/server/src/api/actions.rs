use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use piggybank_core::actions::{ActionEntry, ActionEntryGroup, CreateActionEntry, PiggyBankStats};

use super::{parse_id, ApiJson};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn create_action_entry(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(mut payload): ApiJson<CreateActionEntry>,
) -> ApiResult<(StatusCode, Json<ActionEntry>)> {
    payload.voucher_template_id = parse_id(&payload.voucher_template_id, "voucherTemplateId")?;
    let created = state
        .action_service
        .create_action_entry(&user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_action_entries(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ActionEntryGroup>>> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.action_service.list_action_entries(&id, &user.id)?))
}

async fn get_stats(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<PiggyBankStats>> {
    let id = parse_id(&id, "id")?;
    Ok(Json(state.action_service.get_stats(&id, &user.id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/action-entries", post(create_action_entry))
        .route("/piggybanks/{id}/action-entries", get(list_action_entries))
        .route("/piggybanks/{id}/stats", get(get_stats))
}

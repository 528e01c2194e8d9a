use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use piggybank_core::vouchers::{CreateVoucherTemplate, VoucherTemplate};

use super::{parse_id, ApiJson};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn create_voucher_template(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(mut payload): ApiJson<CreateVoucherTemplate>,
) -> ApiResult<(StatusCode, Json<VoucherTemplate>)> {
    payload.piggy_bank_id = parse_id(&payload.piggy_bank_id, "piggyBankId")?;
    let created = state
        .voucher_service
        .create_voucher_template(&user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_voucher_templates(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<VoucherTemplate>>> {
    let id = parse_id(&id, "id")?;
    Ok(Json(
        state.voucher_service.list_voucher_templates(&id, &user.id)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voucher-templates", post(create_voucher_template))
        .route(
            "/piggybanks/{id}/voucher-templates",
            get(list_voucher_templates),
        )
}

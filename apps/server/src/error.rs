use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use piggybank_core::actions::ActionError;
use piggybank_core::couples::CoupleError;
use piggybank_core::errors::{DatabaseError, Error as CoreError};
use piggybank_core::piggybanks::PiggyBankError;
use piggybank_core::users::UserError;
use piggybank_core::vouchers::VoucherError;

use crate::auth::AuthError;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn user_status(err: &UserError) -> StatusCode {
    match err {
        UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        UserError::NotFound(_) => StatusCode::NOT_FOUND,
        UserError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        UserError::EmailRequired
        | UserError::InvalidEmail
        | UserError::PasswordTooShort
        | UserError::NameRequired
        | UserError::EmailAlreadyRegistered => StatusCode::BAD_REQUEST,
    }
}

fn couple_status(err: &CoupleError) -> StatusCode {
    match err {
        CoupleError::PartnerRequired
        | CoupleError::InvalidPartnerEmail
        | CoupleError::CannotInviteSelf
        | CoupleError::InvalidInvitationToken
        | CoupleError::InvitationEmailMismatch => StatusCode::BAD_REQUEST,
        CoupleError::AlreadyCoupled
        | CoupleError::PendingRequestExists
        | CoupleError::RequestNotPending
        | CoupleError::InvitationAlreadyClaimed => StatusCode::CONFLICT,
        CoupleError::RequestNotFound => StatusCode::NOT_FOUND,
        CoupleError::RequestNotAuthorized => StatusCode::FORBIDDEN,
    }
}

/// Status code for a core error. Anything not listed is a server fault.
pub fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::User(e) => user_status(e),
        CoreError::Couple(e) => couple_status(e),
        CoreError::PiggyBank(PiggyBankError::NotFound) => StatusCode::NOT_FOUND,
        CoreError::PiggyBank(PiggyBankError::NotAuthorized) => StatusCode::FORBIDDEN,
        CoreError::PiggyBank(PiggyBankError::TitleRequired) => StatusCode::BAD_REQUEST,
        CoreError::Voucher(VoucherError::NotAuthorized) => StatusCode::FORBIDDEN,
        CoreError::Voucher(_) => StatusCode::BAD_REQUEST,
        CoreError::Action(ActionError::NotAuthorized) => StatusCode::FORBIDDEN,
        CoreError::Action(ActionError::VoucherTemplateNotFound) => StatusCode::NOT_FOUND,
        CoreError::Action(ActionError::PiggyBankEnded) => StatusCode::BAD_REQUEST,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(_) | CoreError::Email(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoucherError {
    #[error("not authorized to access this piggybank")]
    NotAuthorized,

    #[error("title is required")]
    TitleRequired,

    #[error("amountCents must be positive")]
    NonPositiveAmount,
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("not authorized to access this piggybank")]
    NotAuthorized,

    #[error("voucher template not found")]
    VoucherTemplateNotFound,

    #[error("piggybank has ended")]
    PiggyBankEnded,
}

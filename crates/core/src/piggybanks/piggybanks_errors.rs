use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PiggyBankError {
    #[error("piggybank not found")]
    NotFound,

    #[error("not authorized to access this piggybank")]
    NotAuthorized,

    #[error("title is required")]
    TitleRequired,
}

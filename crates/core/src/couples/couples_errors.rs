use thiserror::Error;

/// Errors raised by the pairing workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoupleError {
    #[error("partner email is required")]
    PartnerRequired,

    #[error("invalid partner email")]
    InvalidPartnerEmail,

    #[error("cannot invite yourself")]
    CannotInviteSelf,

    #[error("user already belongs to a couple")]
    AlreadyCoupled,

    #[error("a pending couple request already exists")]
    PendingRequestExists,

    #[error("couple request not found")]
    RequestNotFound,

    #[error("not authorized to act on this couple request")]
    RequestNotAuthorized,

    #[error("couple request is no longer pending")]
    RequestNotPending,

    #[error("invalid invitation token")]
    InvalidInvitationToken,

    #[error("email does not match invitation")]
    InvitationEmailMismatch,

    #[error("invitation has already been claimed")]
    InvitationAlreadyClaimed,
}

//! Couples module - pairing requests, invitations and couple membership.

mod couples_errors;
mod couples_model;
mod couples_service;
mod couples_traits;


pub use couples_errors::CoupleError;
pub use couples_model::{
    generate_invitation_token, Couple, CoupleRequest, CoupleStatus, CoupleStatusView, CoupleTarget,
    CoupleView, NewCoupleRequest, RegisterWithInvitation, RequestDirection, RequestView,
};
pub use couples_service::CoupleService;
pub use couples_traits::{CoupleRepositoryTrait, CoupleServiceTrait};

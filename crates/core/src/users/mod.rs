//! Users module - account records, registration and credential checks.

mod users_errors;
mod users_model;
mod users_service;
mod users_traits;

#[cfg(test)]
mod users_service_tests;

pub use users_errors::UserError;
pub use users_model::{NewUser, RegisterUser, User, UserSummary};
pub use users_service::{is_valid_email, normalize_email, UserService};
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod mailer;
pub mod shutdown;
mod main_lib;

pub use main_lib::{build_state, build_state_with_mailer, init_tracing, AppState};

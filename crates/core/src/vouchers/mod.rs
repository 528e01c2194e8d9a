//! Vouchers module - reward templates scoped to a piggybank.

mod vouchers_errors;
mod vouchers_model;
mod vouchers_service;
mod vouchers_traits;


pub use vouchers_errors::VoucherError;
pub use vouchers_model::{CreateVoucherTemplate, NewVoucherTemplate, VoucherTemplate};
pub use vouchers_service::VoucherService;
pub use vouchers_traits::{VoucherRepositoryTrait, VoucherServiceTrait};

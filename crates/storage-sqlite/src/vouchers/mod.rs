//! SQLite storage implementation for voucher templates.

mod model;
mod repository;

pub use model::{NewVoucherTemplateDB, VoucherTemplateDB};
pub use repository::VoucherRepository;

//! SQLite storage implementation for couple requests and couples.

mod model;
mod repository;

pub use model::{CoupleDB, CoupleMemberDB, CoupleRequestDB, NewCoupleRequestDB};
pub use repository::CoupleRepository;

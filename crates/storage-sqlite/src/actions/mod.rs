//! SQLite storage implementation for action entries.

mod model;
mod repository;

pub use model::{ActionEntryDB, NewActionEntryDB};
pub use repository::ActionRepository;

//! Actions module - append-only voucher redemptions and goal statistics.

mod actions_errors;
mod actions_model;
mod actions_service;
mod actions_traits;


pub use actions_errors::ActionError;
pub use actions_model::{
    group_by_template, ActionEntry, ActionEntryGroup, ActionEntrySummary, CreateActionEntry,
    NewActionEntry, PiggyBankStats, VoucherTemplateSummary,
};
pub use actions_service::ActionService;
pub use actions_traits::{ActionRepositoryTrait, ActionServiceTrait};

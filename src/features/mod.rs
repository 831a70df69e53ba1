//! # Features Layer
//!
//! Feature modules for the treasury bot: the ledger (people and balances),
//! the chat roster (identity resolution) and the reminder subsystem
//! (registry + scheduler).

pub mod ledger;
pub mod reminders;
pub mod roster;

// Re-export feature items
pub use ledger::{classify, load_people, LedgerSource, Person, SheetLedger};
pub use reminders::{
    NotificationService, Outcome, RegisterError, ReminderRegistry, ReminderScheduler,
    ScheduleReport,
};
pub use roster::{ChatIdentity, ExactNameResolver, IdentityResolver, RosterSource};

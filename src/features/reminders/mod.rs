//! # Feature: Reminders
//!
//! Recurring payment reminders for debtors: a process-wide registry of
//! active reminders, per-person schedule overrides and exclusions, and the
//! scheduler that reconciles the ledger against it.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.0.0: Registry object replaces process globals; generation fencing
//! - 1.1.0: Per-person creation failures no longer abort the batch
//! - 1.0.0: Initial toggle on/off scheduling

pub mod registry;
pub mod scheduler;

use async_trait::async_trait;

use crate::core::errors::ServiceError;

pub use registry::{RegisterError, ReminderRegistry};
pub use scheduler::{Outcome, ReminderScheduler, ScheduleReport};

/// External notification service able to create one recurring reminder.
///
/// Callable only with administrative credentials; failures are per-call
/// and never fatal to a scheduling batch.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Create a recurring reminder, returning the service's opaque handle.
    async fn create_reminder(
        &self,
        recipient_id: &str,
        text: &str,
        recurrence: &str,
    ) -> Result<String, ServiceError>;
}

//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with ledger, roster and reminder state

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::errors::AuthorizationError;
use crate::core::reply::bold;
use crate::features::ledger::LedgerSource;
use crate::features::reminders::{ReminderRegistry, ReminderScheduler};
use crate::features::roster::RosterSource;

/// Shared context for all command handlers
///
/// Holds the external collaborators and the one piece of mutable state
/// (the reminder registry). Constructed once at startup and shared behind
/// an `Arc`.
pub struct CommandContext {
    pub ledger: Arc<dyn LedgerSource>,
    pub roster: Arc<dyn RosterSource>,
    pub registry: Arc<ReminderRegistry>,
    pub scheduler: ReminderScheduler,
    pub config: Config,
}

impl CommandContext {
    pub fn new(
        ledger: Arc<dyn LedgerSource>,
        roster: Arc<dyn RosterSource>,
        registry: Arc<ReminderRegistry>,
        scheduler: ReminderScheduler,
        config: Config,
    ) -> Self {
        CommandContext {
            ledger,
            roster,
            registry,
            scheduler,
            config,
        }
    }

    /// Gate for the administrative commands. No state is touched on denial.
    pub fn require_treasurer(&self, actor_name: &str) -> Result<(), AuthorizationError> {
        if self.config.is_treasurer(actor_name) {
            Ok(())
        } else {
            Err(AuthorizationError {
                actor: actor_name.to_string(),
            })
        }
    }

    /// Fixed denial reply for non-treasurers.
    pub fn denial_reply(&self) -> String {
        format!(
            "This command can only be run by the {} treasurers, please contact {} if you think you should be able to run it.",
            self.config.team,
            bold(self.config.treasurer_list())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::test_context;

    #[test]
    fn test_require_treasurer_accepts_configured_name() {
        let ctx = test_context();
        assert!(ctx.require_treasurer("Louis Stewart").is_ok());
    }

    #[test]
    fn test_require_treasurer_denies_others() {
        let ctx = test_context();
        let err = ctx.require_treasurer("Alice").unwrap_err();
        assert_eq!(err.actor, "Alice");
    }

    #[test]
    fn test_denial_reply_names_treasurers() {
        let ctx = test_context();
        let reply = ctx.denial_reply();
        assert!(reply.contains("Ranelagh"));
        assert!(reply.contains("Louis Stewart"));
    }
}

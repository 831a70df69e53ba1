//! # Command System
//!
//! Slash command (/) handling for the treasury bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Handler trait, registry and per-command handler modules

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::{CommandInvocation, SlashCommandHandler};
pub use registry::CommandRegistry;

/// Shared fixtures for handler tests.
#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use crate::core::config::{Config, DEFAULT_REMINDER_TIME};
    use crate::core::errors::{LoadError, ServiceError};
    use crate::features::ledger::LedgerSource;
    use crate::features::reminders::{
        NotificationService, ReminderRegistry, ReminderScheduler,
    };
    use crate::features::roster::{ChatIdentity, ExactNameResolver, RosterSource};

    use super::context::CommandContext;

    pub(crate) struct MockLedger {
        csv: Result<String, String>,
    }

    impl MockLedger {
        pub(crate) fn with_rows(rows: &[(&str, &str)]) -> Self {
            let mut csv = String::from("Name,Balance,Total Debit,Total Paid\n");
            for (name, balance) in rows {
                csv.push_str(&format!("{name},{balance},€100.00,€80.00\n"));
            }
            csv.push_str("x,,,\ny,,,\nTotals,,,\n");
            MockLedger { csv: Ok(csv) }
        }

        pub(crate) fn unavailable() -> Self {
            MockLedger {
                csv: Err("connection refused".into()),
            }
        }
    }

    #[async_trait]
    impl LedgerSource for MockLedger {
        async fn fetch(&self) -> Result<String, LoadError> {
            self.csv.clone().map_err(LoadError::Fetch)
        }
    }

    pub(crate) struct MockRoster {
        identities: Vec<ChatIdentity>,
    }

    impl MockRoster {
        pub(crate) fn with(names: &[(&str, &str)]) -> Self {
            MockRoster {
                identities: names
                    .iter()
                    .map(|(id, name)| ChatIdentity {
                        id: id.to_string(),
                        display_name: name.to_string(),
                    })
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl RosterSource for MockRoster {
        async fn list_identities(&self) -> anyhow::Result<Vec<ChatIdentity>> {
            Ok(self.identities.clone())
        }
    }

    #[derive(Default)]
    pub(crate) struct MockNotifier {
        pub(crate) created: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl NotificationService for MockNotifier {
        async fn create_reminder(
            &self,
            recipient_id: &str,
            text: &str,
            recurrence: &str,
        ) -> Result<String, ServiceError> {
            let mut created = self.created.lock().unwrap();
            created.push((
                recipient_id.to_string(),
                text.to_string(),
                recurrence.to_string(),
            ));
            Ok(format!("Rm{:02}", created.len()))
        }
    }

    pub(crate) fn test_config() -> Config {
        Config {
            slack_token: "xoxb-test".into(),
            user_slack_token: "xoxp-test".into(),
            spreadsheet_id: "sheet".into(),
            sheet_name: "0".into(),
            team: "Ranelagh".into(),
            treasurers: vec!["Louis Stewart".into()],
            bank_iban: "DE00000000000000000000".into(),
            bank_bic: "NTSBDEB1XXX".into(),
            default_reminder_time: DEFAULT_REMINDER_TIME.into(),
            port: 8080,
        }
    }

    pub(crate) fn context_with(ledger: MockLedger, roster: MockRoster) -> Arc<CommandContext> {
        let config = test_config();
        let ledger: Arc<dyn LedgerSource> = Arc::new(ledger);
        let roster: Arc<dyn RosterSource> = Arc::new(roster);
        let notifier: Arc<dyn NotificationService> = Arc::new(MockNotifier::default());
        let registry = Arc::new(ReminderRegistry::new(
            config.default_reminder_time.as_str(),
        ));
        let scheduler = ReminderScheduler::new(
            Arc::clone(&ledger),
            Arc::clone(&roster),
            notifier,
            Arc::new(ExactNameResolver),
            Arc::clone(&registry),
            config.team.as_str(),
            config.treasurer_list(),
        );
        Arc::new(CommandContext::new(
            ledger, roster, registry, scheduler, config,
        ))
    }

    /// Alice owes, Bob is prepaid, Carol is settled; Alice and Bob are on
    /// the roster.
    pub(crate) fn test_context() -> Arc<CommandContext> {
        context_with(
            MockLedger::with_rows(&[("Alice", "-€20.00"), ("Bob", "€10.00"), ("Carol", "€0.00")]),
            MockRoster::with(&[("U1", "Alice"), ("U2", "Bob")]),
        )
    }
}

//! Reminder scheduler
//!
//! Orchestrates one toggle-on run: load the ledger, keep the debtors,
//! resolve each to a chat identity and reconcile against the registry.
//! Every debtor ends in exactly one terminal outcome; nothing in the batch
//! can hang it or abort it short of the ledger itself being unreachable.

use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

use crate::core::currency::format_euros;
use crate::core::errors::{LoadError, ServiceError};
use crate::core::reply::{bold, italic, join_sections};
use crate::features::ledger::{classify, load_people, LedgerSource, Person};
use crate::features::roster::{ChatIdentity, IdentityResolver, RosterSource};

use super::registry::{RegisterError, ReminderRegistry};
use super::NotificationService;

/// Upper bound on any single external call made during a run.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal state of one debtor within one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new reminder was created and registered.
    Created { recurrence: String },
    /// On the exclusion list; never reminded regardless of debt.
    SkippedExcluded,
    /// A reminder already exists for this name.
    SkippedAlreadyActive,
    /// No chat identity matched the ledger name.
    Unreachable,
    /// The notification service refused or timed out for this person only.
    Failed { reason: String },
}

/// One debtor's result, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtorOutcome {
    pub name: String,
    pub owed: Decimal,
    pub outcome: Outcome,
}

/// Everything that happened in one toggle-on run.
#[derive(Debug, Clone)]
pub struct ScheduleReport {
    pub run_id: Uuid,
    pub outcomes: Vec<DebtorOutcome>,
    /// A toggle-off cleared the registry while this run was in flight;
    /// remaining debtors were left untouched.
    pub superseded: bool,
}

impl ScheduleReport {
    fn by_outcome(&self, want: impl Fn(&Outcome) -> bool) -> impl Iterator<Item = &DebtorOutcome> {
        self.outcomes.iter().filter(move |o| want(&o.outcome))
    }

    pub fn created_count(&self) -> usize {
        self.by_outcome(|o| matches!(o, Outcome::Created { .. }))
            .count()
    }

    /// Human-readable summary, grouped by outcome, debtor order preserved
    /// within each group.
    pub fn render(&self) -> String {
        if self.outcomes.is_empty() && !self.superseded {
            return "No debtors need reminding right now.".to_string();
        }

        let created: Vec<String> = self
            .outcomes
            .iter()
            .filter_map(|item| match &item.outcome {
                Outcome::Created { recurrence } => Some(format!(
                    "Reminded {}: owes {} Euros ({})",
                    bold(&item.name),
                    bold(format_euros(item.owed)),
                    italic(recurrence)
                )),
                _ => None,
            })
            .collect();
        let already: Vec<String> = self
            .by_outcome(|o| *o == Outcome::SkippedAlreadyActive)
            .map(|item| format!("Skipped {}, already being reminded", item.name))
            .collect();
        let excluded: Vec<String> = self
            .by_outcome(|o| *o == Outcome::SkippedExcluded)
            .map(|item| format!("Skipped {}, excluded from reminders", item.name))
            .collect();
        let unreachable: Vec<String> = self
            .by_outcome(|o| *o == Outcome::Unreachable)
            .map(|item| {
                format!(
                    "Couldn't find {} in the chat roster but they owe {} Euros",
                    item.name,
                    format_euros(item.owed)
                )
            })
            .collect();
        let failed: Vec<String> = self
            .outcomes
            .iter()
            .filter_map(|item| match &item.outcome {
                Outcome::Failed { reason } => Some(format!(
                    "Could not set a reminder for {}: {reason}",
                    item.name
                )),
                _ => None,
            })
            .collect();

        let mut sections = vec![
            created.join("\n"),
            already.join("\n"),
            excluded.join("\n"),
            unreachable.join("\n"),
            failed.join("\n"),
        ];
        if self.superseded {
            sections.push(
                "Reminders were switched off while this run was in progress; \
                 remaining debtors were left alone."
                    .to_string(),
            );
        }
        join_sections(sections)
    }
}

/// Marker: the registry generation moved on mid-run.
struct RunSuperseded;

/// Drives toggle-on and toggle-off over the external collaborators.
pub struct ReminderScheduler {
    ledger: Arc<dyn LedgerSource>,
    roster: Arc<dyn RosterSource>,
    notifier: Arc<dyn NotificationService>,
    resolver: Arc<dyn IdentityResolver>,
    registry: Arc<ReminderRegistry>,
    call_timeout: Duration,
    team: String,
    treasurers: String,
}

impl ReminderScheduler {
    pub fn new(
        ledger: Arc<dyn LedgerSource>,
        roster: Arc<dyn RosterSource>,
        notifier: Arc<dyn NotificationService>,
        resolver: Arc<dyn IdentityResolver>,
        registry: Arc<ReminderRegistry>,
        team: impl Into<String>,
        treasurers: impl Into<String>,
    ) -> Self {
        ReminderScheduler {
            ledger,
            roster,
            notifier,
            resolver,
            registry,
            call_timeout: CALL_TIMEOUT,
            team: team.into(),
            treasurers: treasurers.into(),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn registry(&self) -> &ReminderRegistry {
        &self.registry
    }

    /// Run the toggle-on reconciliation over the current ledger.
    ///
    /// Only a ledger failure aborts; everything else is a per-debtor
    /// outcome collected into the report.
    pub async fn toggle_on(&self) -> Result<ScheduleReport, LoadError> {
        let run_id = Uuid::new_v4();
        let generation = self.registry.generation();

        let people = timeout(self.call_timeout, load_people(self.ledger.as_ref()))
            .await
            .map_err(|_| {
                LoadError::Fetch(format!("ledger fetch timed out after {:?}", self.call_timeout))
            })??;
        let (debtors, _prepaid) = classify(&people);
        info!(
            "[{run_id}] scheduling run: {} debtors of {} people (generation {generation})",
            debtors.len(),
            people.len()
        );

        let roster = self.fetch_roster(run_id).await;

        let mut outcomes = Vec::with_capacity(debtors.len());
        let mut superseded = false;
        for debtor in debtors {
            match self
                .schedule_one(run_id, generation, &debtor, &roster)
                .await
            {
                Ok(outcome) => outcomes.push(DebtorOutcome {
                    name: debtor.name,
                    owed: debtor.current_balance,
                    outcome,
                }),
                Err(RunSuperseded) => {
                    info!("[{run_id}] registry cleared mid-run, abandoning remaining debtors");
                    superseded = true;
                    break;
                }
            }
        }

        let report = ScheduleReport {
            run_id,
            outcomes,
            superseded,
        };
        info!(
            "[{run_id}] run complete: {} created of {} debtors",
            report.created_count(),
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Toggle-off: wipe the registry. Active reminders, schedule overrides
    /// and exclusions all go together.
    pub fn toggle_off(&self) {
        self.registry.clear_all();
    }

    async fn fetch_roster(&self, run_id: Uuid) -> Vec<ChatIdentity> {
        // A missing roster makes every debtor unreachable rather than
        // failing or hanging the run.
        match timeout(self.call_timeout, self.roster.list_identities()).await {
            Ok(Ok(roster)) => roster,
            Ok(Err(err)) => {
                warn!("[{run_id}] roster listing failed: {err}");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "[{run_id}] roster listing timed out after {:?}",
                    self.call_timeout
                );
                Vec::new()
            }
        }
    }

    async fn schedule_one(
        &self,
        run_id: Uuid,
        generation: u64,
        debtor: &Person,
        roster: &[ChatIdentity],
    ) -> Result<Outcome, RunSuperseded> {
        let identity = match self.resolver.resolve(&debtor.name, roster) {
            Some(identity) => identity,
            None => return Ok(Outcome::Unreachable),
        };

        if self.registry.is_excluded(&debtor.name) {
            return Ok(Outcome::SkippedExcluded);
        }
        if self.registry.has_active(&debtor.name) {
            return Ok(Outcome::SkippedAlreadyActive);
        }

        let recurrence = self.registry.schedule_for(&debtor.name);
        let text = self.reminder_text(debtor);

        let created = timeout(
            self.call_timeout,
            self.notifier.create_reminder(&identity.id, &text, &recurrence),
        )
        .await;

        let handle = match created {
            Ok(Ok(handle)) => handle,
            Ok(Err(err)) => {
                warn!("[{run_id}] reminder creation failed for {}: {err}", debtor.name);
                return Ok(Outcome::Failed {
                    reason: err.to_string(),
                });
            }
            Err(_) => {
                let err = ServiceError::Timeout(self.call_timeout);
                warn!("[{run_id}] reminder creation for {}: {err}", debtor.name);
                return Ok(Outcome::Failed {
                    reason: err.to_string(),
                });
            }
        };

        match self
            .registry
            .register_if_current(generation, &debtor.name, &handle)
        {
            Ok(()) => Ok(Outcome::Created { recurrence }),
            // raced with a concurrent toggle-on that got there first
            Err(RegisterError::AlreadyActive(_)) => Ok(Outcome::SkippedAlreadyActive),
            Err(RegisterError::StaleGeneration) => Err(RunSuperseded),
        }
    }

    fn reminder_text(&self, debtor: &Person) -> String {
        format!(
            "You owe {} {} Euros.\nPlease use /paywhere to pay or contact {}",
            self.team,
            format_euros(debtor.current_balance),
            self.treasurers
        )
    }
}

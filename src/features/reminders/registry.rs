//! Reminder registry
//!
//! The single piece of mutable shared state in the bot. One exclusive lock
//! guards the active-reminder map, the schedule overrides, the exclusion
//! set and the generation counter; every critical section is short and
//! never blocks on I/O.

use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use thiserror::Error;

/// A registration was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegisterError {
    /// A reminder is already active for this name. Callers are expected to
    /// check `has_active` first; this is a scheduling outcome, not a fault.
    #[error("a reminder is already active for {0}")]
    AlreadyActive(String),
    /// The registry was cleared after the caller's run started. The run
    /// must abandon any further registrations.
    #[error("registry generation moved on, run is stale")]
    StaleGeneration,
}

#[derive(Debug, Default)]
struct Inner {
    /// name -> opaque external reminder handle; at most one per name
    active: HashMap<String, String>,
    /// name -> recurrence override, last write wins
    schedules: HashMap<String, String>,
    /// names that must never receive a newly created reminder
    excluded: HashSet<String>,
    /// bumped by every clear_all, fences stale in-flight runs
    generation: u64,
    /// process-wide fallback recurrence
    default_recurrence: String,
}

/// Process-lifetime scheduling state.
///
/// Constructed empty at startup, grown additively by toggle-on runs, wiped
/// entirely by toggle-off. Nothing here survives a restart.
pub struct ReminderRegistry {
    inner: Mutex<Inner>,
}

impl ReminderRegistry {
    pub fn new(default_recurrence: impl Into<String>) -> Self {
        ReminderRegistry {
            inner: Mutex::new(Inner {
                default_recurrence: default_recurrence.into(),
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-critical-section; the registry
        // maps are still structurally valid, so keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a reminder is currently registered for this name.
    pub fn has_active(&self, name: &str) -> bool {
        self.lock().active.contains_key(name)
    }

    /// Guarded, non-overwriting insert of an active reminder handle.
    pub fn register(&self, name: &str, handle: &str) -> Result<(), RegisterError> {
        let mut inner = self.lock();
        if inner.active.contains_key(name) {
            return Err(RegisterError::AlreadyActive(name.to_string()));
        }
        inner.active.insert(name.to_string(), handle.to_string());
        debug!("registered reminder {handle} for {name}");
        Ok(())
    }

    /// `register`, fenced on the generation the caller's run started with.
    ///
    /// If a toggle-off cleared the registry since, the stale run's handle
    /// is refused so a wiped registry never grows orphaned entries.
    pub fn register_if_current(
        &self,
        generation: u64,
        name: &str,
        handle: &str,
    ) -> Result<(), RegisterError> {
        let mut inner = self.lock();
        if inner.generation != generation {
            return Err(RegisterError::StaleGeneration);
        }
        if inner.active.contains_key(name) {
            return Err(RegisterError::AlreadyActive(name.to_string()));
        }
        inner.active.insert(name.to_string(), handle.to_string());
        debug!("registered reminder {handle} for {name}");
        Ok(())
    }

    /// Drop all active reminders, schedule overrides and exclusions in one
    /// critical section, and bump the generation so in-flight runs notice.
    pub fn clear_all(&self) {
        let mut inner = self.lock();
        let dropped = inner.active.len();
        inner.active.clear();
        inner.schedules.clear();
        inner.excluded.clear();
        inner.generation += 1;
        info!(
            "cleared reminder registry ({dropped} active dropped, generation now {})",
            inner.generation
        );
    }

    /// Generation counter at this moment; runs snapshot it at start.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Recurrence for this name: the override if present, else the default.
    ///
    /// The first lookup with no override persists the default as that
    /// name's override, so later displays show a concrete value and a
    /// later default change never retroactively moves an already-scheduled
    /// person. Deliberate, if surprising.
    pub fn schedule_for(&self, name: &str) -> String {
        let mut inner = self.lock();
        if let Some(recurrence) = inner.schedules.get(name) {
            return recurrence.clone();
        }
        let default = inner.default_recurrence.clone();
        inner.schedules.insert(name.to_string(), default.clone());
        default
    }

    /// Replace the process-wide fallback recurrence.
    ///
    /// Names that already looked up their schedule keep the value that was
    /// persisted for them at the time.
    pub fn set_default(&self, recurrence: &str) {
        self.lock().default_recurrence = recurrence.to_string();
    }

    /// Set (or replace) a per-person recurrence override.
    pub fn set_schedule(&self, name: &str, recurrence: &str) {
        self.lock()
            .schedules
            .insert(name.to_string(), recurrence.to_string());
        info!("schedule for {name} set to {recurrence:?}");
    }

    /// Never create new reminders for this name, regardless of debt.
    pub fn exclude(&self, name: &str) {
        self.lock().excluded.insert(name.to_string());
        info!("{name} excluded from future reminders");
    }

    /// Remove the name from the exclusion set. Returns whether it was there.
    pub fn include(&self, name: &str) -> bool {
        let removed = self.lock().excluded.remove(name);
        if removed {
            info!("{name} re-included in future reminders");
        }
        removed
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.lock().excluded.contains(name)
    }

    /// Names with an active reminder, for display and logging.
    pub fn active_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().active.keys().cloned().collect();
        names.sort();
        names
    }
}

// Core layer - configuration, errors, currency and reply helpers
pub mod core;

// Features layer - ledger, roster and reminder modules
pub mod features;

// Application layer - slash command dispatch
pub mod commands;

// Slack Web API glue (roster source, notification service, replies)
pub mod slack;

// Re-export core config and errors
pub use crate::core::{AuthorizationError, Config, LoadError, ParseError, ServiceError};

// Re-export feature items
pub use features::{
    // Ledger
    classify, load_people, LedgerSource, Person, SheetLedger,
    // Roster
    ChatIdentity, ExactNameResolver, IdentityResolver, RosterSource,
    // Reminders
    NotificationService, Outcome, ReminderRegistry, ReminderScheduler, ScheduleReport,
};

// Re-export command infrastructure
pub use commands::{CommandContext, CommandInvocation, CommandRegistry, SlashCommandHandler};

pub use slack::SlackClient;

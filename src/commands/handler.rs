//! Slash command handler trait and invocation type
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;

/// One inbound slash command, already resolved to an actor.
///
/// The HTTP glue decodes the platform payload and looks up the actor's
/// display name before dispatch; handlers are pure functions of this plus
/// the shared context.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    /// Platform id of whoever issued the command
    pub actor_id: String,
    /// Display name, matched against the ledger and the treasurer list
    pub actor_name: String,
    /// Command name without the leading slash
    pub command: String,
    /// Free-text argument, possibly empty
    pub text: String,
}

/// Trait for slash command handlers
///
/// Each handler processes one or more commands and returns the reply text.
/// Handlers are registered with a `CommandRegistry` and dispatched by
/// command name. A handler error becomes a generic failure reply at the
/// dispatch layer; the bot never leaves a command unanswered.
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command, producing the reply text.
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait must stay object-safe, handlers are stored as trait objects
    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}

    #[test]
    fn test_invocation_is_clone() {
        let invocation = CommandInvocation {
            actor_id: "U1".into(),
            actor_name: "Alice".into(),
            command: "owe".into(),
            text: String::new(),
        };
        let copy = invocation.clone();
        assert_eq!(copy.command, "owe");
    }
}

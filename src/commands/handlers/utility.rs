//! Utility command handlers
//!
//! Handles: paywhere, commands

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};

pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["paywhere", "commands"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        match invocation.command.as_str() {
            "paywhere" => Ok(format!(
                "Pay {} here:\nIBAN: {}\nBIC: {}",
                ctx.config.team, ctx.config.bank_iban, ctx.config.bank_bic
            )),
            _ => Ok(help_text()),
        }
    }
}

fn help_text() -> String {
    "\
/commands:
Displays this list of commands

/owe:
What is my balance?

/paywhere:
What are the bank details?

/breakdown:
Show my payment record

/ping on|off (treasurers only):
Start reminding all debtors, or stop and reset everything

/ping_add <name> (treasurers only):
Put someone back on the reminder list

/ping_remove <name> (treasurers only):
Exclude someone from reminders

/ping_adjust_time <name>, <time> (treasurers only):
Remind someone at a different time"
        .to_string()
}

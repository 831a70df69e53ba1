//! Financial record handler
//!
//! Handles: breakdown

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::currency::format_euros;
use crate::core::reply::bold;
use crate::features::ledger::load_people;

pub struct BreakdownHandler;

#[async_trait]
impl SlashCommandHandler for BreakdownHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["breakdown"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        let people = load_people(ctx.ledger.as_ref()).await?;
        let name = &invocation.actor_name;

        let Some(person) = people.iter().find(|p| p.name == *name) else {
            return Ok(format!(
                "User {name} could not be found in {}'s financial book, please contact {} for further details.",
                ctx.config.team,
                bold(ctx.config.treasurer_list())
            ));
        };

        let mut text = format!("User {}'s breakdown is as follows:\n", bold(name));

        if person.current_balance < Decimal::ZERO {
            text.push_str(&format!(
                "- Current balance is negative: {} Euros need to be paid.\n      _Please use /paywhere command to find out how to pay_\n",
                bold(format_euros(person.current_balance))
            ));
        } else if person.current_balance > Decimal::ZERO {
            text.push_str(&format!(
                "- Current balance is positive in excess of: {} Euros\n",
                bold(format_euros(person.current_balance))
            ));
        } else {
            text.push_str("- Current balance is *0* Euros.\n");
        }

        if person.total_paid > Decimal::ZERO {
            text.push_str(&format!(
                "- You have paid {} {} Euros so far.\n",
                ctx.config.team,
                bold(format_euros(person.total_paid))
            ));
        }

        Ok(text)
    }
}

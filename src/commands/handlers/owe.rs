//! Balance query handler
//!
//! Handles: owe
//!
//! Treasurers get the full debtor and prepaid listing; everyone else gets
//! their own balance line.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::currency::format_euros;
use crate::core::reply::bold;
use crate::features::ledger::{classify, load_people, lookup, Person};

pub struct OweHandler;

#[async_trait]
impl SlashCommandHandler for OweHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["owe"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        debug!("owe query from {}", invocation.actor_name);

        let people = load_people(ctx.ledger.as_ref()).await?;
        let (debtors, prepaid) = classify(&people);

        let mut reply = if ctx.config.is_treasurer(&invocation.actor_name) {
            full_listing(&debtors, &prepaid)
        } else {
            personal_line(&invocation.actor_name, &ctx.config.team, &people)
        };

        reply.push_str("\nUse the _/paywhere_ command to find out how to pay.");
        Ok(reply)
    }
}

fn full_listing(debtors: &[Person], prepaid: &[Person]) -> String {
    let mut text = String::new();
    for person in debtors {
        text.push_str(&format!(
            "{} needs to pay {} Euros\n",
            bold(&person.name),
            bold(format_euros(person.current_balance))
        ));
    }
    text.push('\n');
    for person in prepaid {
        text.push_str(&format!(
            "{} paid {} Euros in advance\n",
            bold(&person.name),
            bold(format_euros(person.current_balance))
        ));
    }
    text
}

fn personal_line(name: &str, team: &str, people: &[Person]) -> String {
    // soft miss: an unknown name comes back as a zero-balance person
    let person = lookup(name, people);
    if person.is_debtor() {
        format!(
            "{} needs to pay {} Euros\n",
            bold(&person.name),
            bold(format_euros(person.current_balance))
        )
    } else if person.is_prepaid() {
        format!(
            "{} paid {} Euros in advance\n",
            bold(&person.name),
            bold(format_euros(person.current_balance))
        )
    } else {
        format!("The user {} owes {team} {} money.\n", bold(name), bold("no"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::test_context;

    fn invocation(actor: &str) -> CommandInvocation {
        CommandInvocation {
            actor_id: "U0".into(),
            actor_name: actor.into(),
            command: "owe".into(),
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_treasurer_sees_full_listing() {
        let ctx = test_context();
        let reply = OweHandler
            .handle(ctx, &invocation("Louis Stewart"))
            .await
            .unwrap();

        assert!(reply.contains("*Alice* needs to pay *20.00* Euros"));
        assert!(reply.contains("*Bob* paid *10.00* Euros in advance"));
        // settled people appear in neither listing
        assert!(!reply.contains("Carol"));
    }

    #[tokio::test]
    async fn test_debtor_sees_own_balance() {
        let ctx = test_context();
        let reply = OweHandler.handle(ctx, &invocation("Alice")).await.unwrap();

        assert!(reply.contains("*Alice* needs to pay *20.00* Euros"));
        assert!(!reply.contains("Bob"));
    }

    #[tokio::test]
    async fn test_settled_member_owes_nothing() {
        let ctx = test_context();
        let reply = OweHandler.handle(ctx, &invocation("Carol")).await.unwrap();

        assert!(reply.contains("*Carol* owes Ranelagh *no* money."));
    }

    #[tokio::test]
    async fn test_unknown_name_is_a_soft_miss() {
        let ctx = test_context();
        let reply = OweHandler.handle(ctx, &invocation("Nobody")).await.unwrap();

        // no row in the ledger means a zero balance, not a failure
        assert!(reply.contains("*Nobody* owes Ranelagh *no* money."));
    }

    #[tokio::test]
    async fn test_reply_points_at_paywhere() {
        let ctx = test_context();
        let reply = OweHandler.handle(ctx, &invocation("Alice")).await.unwrap();
        assert!(reply.contains("_/paywhere_"));
    }
}

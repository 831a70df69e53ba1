//! Reminder administration handlers
//!
//! Handles: ping, ping_add, ping_remove, ping_adjust_time
//!
//! All four are treasurer-only. `/ping on` runs a scheduling pass over the
//! current debtors, `/ping off` wipes the whole reminder state (active
//! reminders, schedule overrides and exclusions together).

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use tokio::time::timeout;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::reply::{bold, italic};
use crate::features::reminders::scheduler::CALL_TIMEOUT;

pub struct PingHandler;

#[async_trait]
impl SlashCommandHandler for PingHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "ping_add", "ping_remove", "ping_adjust_time"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> Result<String> {
        if ctx.require_treasurer(&invocation.actor_name).is_err() {
            info!(
                "{} denied {} (not a treasurer)",
                invocation.actor_name, invocation.command
            );
            return Ok(ctx.denial_reply());
        }

        match invocation.command.as_str() {
            "ping" => self.handle_toggle(&ctx, invocation.text.trim()).await,
            "ping_add" => self.handle_add(&ctx, invocation.text.trim()).await,
            "ping_remove" => self.handle_remove(&ctx, invocation.text.trim()).await,
            "ping_adjust_time" => self.handle_adjust(&ctx, &invocation.text).await,
            _ => Ok(String::new()),
        }
    }
}

impl PingHandler {
    /// Handle /ping on|off
    async fn handle_toggle(&self, ctx: &CommandContext, toggle: &str) -> Result<String> {
        match toggle {
            "on" => match ctx.scheduler.toggle_on().await {
                Ok(report) => Ok(report.render()),
                Err(err) => {
                    warn!("toggle-on aborted: {err}");
                    Ok(format!(
                        "Could not load the club ledger ({err}). No reminders were changed."
                    ))
                }
            },
            "off" => {
                ctx.scheduler.toggle_off();
                Ok("Reminders are off. Active reminders, schedule overrides and exclusions have all been cleared.".to_string())
            }
            _ => Ok("Usage: /ping on|off".to_string()),
        }
    }

    /// Handle /ping_add <name> - re-include someone in reminders
    async fn handle_add(&self, ctx: &CommandContext, name: &str) -> Result<String> {
        if name.is_empty() {
            return Ok("Usage: /ping_add <name>".to_string());
        }
        if !self.on_roster(ctx, name).await? {
            return Ok(roster_miss(name));
        }
        ctx.registry.include(name);
        Ok(format!("Adding {} to the remind list.", bold(name)))
    }

    /// Handle /ping_remove <name> - exclude someone from reminders
    async fn handle_remove(&self, ctx: &CommandContext, name: &str) -> Result<String> {
        if name.is_empty() {
            return Ok("Usage: /ping_remove <name>".to_string());
        }
        if !self.on_roster(ctx, name).await? {
            return Ok(roster_miss(name));
        }
        ctx.registry.exclude(name);
        Ok(format!("Skipping {} from future reminders.", bold(name)))
    }

    /// Handle /ping_adjust_time <name>, <time>
    async fn handle_adjust(&self, ctx: &CommandContext, text: &str) -> Result<String> {
        let Some((name, time)) = text.split_once(',') else {
            return Ok("Usage: /ping_adjust_time <name>, <time>".to_string());
        };
        let name = name.trim();
        let time = time.trim();
        if name.is_empty() || time.is_empty() {
            return Ok("Usage: /ping_adjust_time <name>, <time>".to_string());
        }
        if !self.on_roster(ctx, name).await? {
            return Ok(roster_miss(name));
        }
        ctx.registry.set_schedule(name, time);
        Ok(format!(
            "Adjusted reminders to {} for {}.",
            bold(time),
            italic(name)
        ))
    }

    async fn on_roster(&self, ctx: &CommandContext, name: &str) -> Result<bool> {
        let roster = timeout(CALL_TIMEOUT, ctx.roster.list_identities()).await??;
        Ok(roster.iter().any(|identity| identity.display_name == name))
    }
}

fn roster_miss(name: &str) -> String {
    format!("Couldn't find {} in the chat roster.", bold(name))
}

//! Environment-backed configuration
//!
//! Everything the bot needs to talk to Slack and the club spreadsheet is
//! collected here once at startup. Required variables fail fast with a
//! named error; cosmetic ones fall back to club defaults.

use anyhow::{Context, Result};
use std::env;

/// Recurrence used for anyone without a per-person schedule override.
pub const DEFAULT_REMINDER_TIME: &str = "next Monday at 15:00";

/// Bot configuration, built from the environment (plus `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot-scoped Slack token (users.list, users.info, chat.postMessage)
    pub slack_token: String,
    /// User-scoped Slack token, required by reminders.add
    pub user_slack_token: String,
    /// Google spreadsheet id holding the club's finances
    pub spreadsheet_id: String,
    /// Sheet gid within the spreadsheet
    pub sheet_name: String,
    /// Team name used throughout reply text
    pub team: String,
    /// Display names allowed to run the administrative commands
    pub treasurers: Vec<String>,
    pub bank_iban: String,
    pub bank_bic: String,
    /// Default reminder recurrence for debtors without an override
    pub default_reminder_time: String,
    /// Port for the slash-command HTTP server
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `SLACK_TOKEN`, `USER_SLACK_TOKEN`, `SPREADSHEET_ID`, `SHEET_NAME`,
    /// `TEAM`, `TREASURERS` (comma-separated), `BANK_IBAN` and `BANK_BIC`
    /// are required. `PORT` defaults to 8080 and `DEFAULT_REMINDER_TIME`
    /// to "next Monday at 15:00".
    pub fn from_env() -> Result<Self> {
        let treasurers = required("TREASURERS")?
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        if treasurers.is_empty() {
            anyhow::bail!("TREASURERS must name at least one person");
        }

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("PORT is not a valid port number")?,
            Err(_) => 8080,
        };

        Ok(Config {
            slack_token: required("SLACK_TOKEN")?,
            user_slack_token: required("USER_SLACK_TOKEN")?,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheet_name: required("SHEET_NAME")?,
            team: required("TEAM")?,
            treasurers,
            bank_iban: required("BANK_IBAN")?,
            bank_bic: required("BANK_BIC")?,
            default_reminder_time: env::var("DEFAULT_REMINDER_TIME")
                .unwrap_or_else(|_| DEFAULT_REMINDER_TIME.to_string()),
            port,
        })
    }

    /// Whether the given display name may run treasurer-only commands.
    pub fn is_treasurer(&self, name: &str) -> bool {
        self.treasurers.iter().any(|t| t == name)
    }

    /// Treasurer names joined for reply text.
    pub fn treasurer_list(&self) -> String {
        self.treasurers.join(", ")
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("missing required environment variable {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            slack_token: "xoxb-test".into(),
            user_slack_token: "xoxp-test".into(),
            spreadsheet_id: "sheet-id".into(),
            sheet_name: "0".into(),
            team: "Ranelagh".into(),
            treasurers: vec!["Louis Stewart".into(), "Daniel Collins".into()],
            bank_iban: "DE00000000000000000000".into(),
            bank_bic: "NTSBDEB1XXX".into(),
            default_reminder_time: DEFAULT_REMINDER_TIME.into(),
            port: 8080,
        }
    }

    #[test]
    fn test_is_treasurer_exact_name() {
        let config = sample();
        assert!(config.is_treasurer("Louis Stewart"));
        assert!(!config.is_treasurer("louis stewart"));
        assert!(!config.is_treasurer("Somebody Else"));
    }

    #[test]
    fn test_treasurer_list_joined() {
        let config = sample();
        assert_eq!(config.treasurer_list(), "Louis Stewart, Daniel Collins");
    }
}

//! # Slack Glue
//!
//! Thin Slack Web API client behind the core's collaborator traits:
//! `RosterSource` via `users.list`, `NotificationService` via
//! `reminders.add`, plus reply delivery via `chat.postMessage`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.5.0
//! - **Toggleable**: false

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

use crate::core::errors::ServiceError;
use crate::features::reminders::NotificationService;
use crate::features::roster::{ChatIdentity, RosterSource};

const API_BASE: &str = "https://slack.com/api";

/// Upper bound on one Web API call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Slack Web API client.
///
/// Carries two tokens: the bot token for queries and message posting, and
/// the user-scoped token reminders.add insists on.
pub struct SlackClient {
    http: reqwest::Client,
    bot_token: String,
    user_token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    ok: bool,
    error: Option<String>,
    user: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    real_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct Member {
    id: String,
    real_name: Option<String>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    is_bot: bool,
}

#[derive(Debug, Deserialize)]
struct RemindersAddResponse {
    ok: bool,
    error: Option<String>,
    reminder: Option<ReminderInfo>,
}

#[derive(Debug, Deserialize)]
struct ReminderInfo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(bot_token: impl Into<String>, user_token: impl Into<String>) -> Self {
        SlackClient {
            http: reqwest::Client::new(),
            bot_token: bot_token.into(),
            user_token: user_token.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base, for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a user id to the display name the ledger uses.
    pub async fn user_real_name(&self, user_id: &str) -> Result<String> {
        let request = async {
            self.http
                .get(format!("{}/users.info", self.base_url))
                .bearer_auth(&self.bot_token)
                .query(&[("user", user_id)])
                .send()
                .await?
                .json::<UserInfoResponse>()
                .await
        };
        let response = timeout(HTTP_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("users.info timed out after {HTTP_TIMEOUT:?}"))??;

        if !response.ok {
            return Err(anyhow!(
                "users.info failed: {}",
                response.error.unwrap_or_default()
            ));
        }
        response
            .user
            .and_then(|u| u.real_name)
            .ok_or_else(|| anyhow!("users.info returned no real_name for {user_id}"))
    }

    /// Post reply text where the command came from: straight back to the
    /// user for direct messages, into the channel otherwise.
    pub async fn send_reply(
        &self,
        user_id: &str,
        channel_name: &str,
        channel_id: &str,
        text: &str,
    ) -> Result<()> {
        let target = if channel_name == "directmessage" {
            user_id
        } else {
            channel_id
        };
        self.post_message(target, text).await
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let request = async {
            self.http
                .post(format!("{}/chat.postMessage", self.base_url))
                .bearer_auth(&self.bot_token)
                .json(&serde_json::json!({ "channel": channel, "text": text }))
                .send()
                .await?
                .json::<PostMessageResponse>()
                .await
        };
        let response = timeout(HTTP_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("chat.postMessage timed out after {HTTP_TIMEOUT:?}"))??;

        if !response.ok {
            return Err(anyhow!(
                "chat.postMessage failed: {}",
                response.error.unwrap_or_default()
            ));
        }
        debug!("posted {} chars to {channel}", text.len());
        Ok(())
    }
}

#[async_trait]
impl RosterSource for SlackClient {
    async fn list_identities(&self) -> Result<Vec<ChatIdentity>> {
        let response: UsersListResponse = self
            .http
            .get(format!("{}/users.list", self.base_url))
            .bearer_auth(&self.bot_token)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(anyhow!(
                "users.list failed: {}",
                response.error.unwrap_or_default()
            ));
        }

        Ok(response
            .members
            .into_iter()
            .filter(|m| !m.deleted && !m.is_bot)
            .filter_map(|m| {
                m.real_name.map(|real_name| ChatIdentity {
                    id: m.id,
                    display_name: real_name,
                })
            })
            .collect())
    }
}

#[async_trait]
impl NotificationService for SlackClient {
    async fn create_reminder(
        &self,
        recipient_id: &str,
        text: &str,
        recurrence: &str,
    ) -> Result<String, ServiceError> {
        let response: RemindersAddResponse = self
            .http
            .post(format!("{}/reminders.add", self.base_url))
            .bearer_auth(&self.user_token)
            .json(&serde_json::json!({
                "text": text,
                "time": recurrence,
                "user": recipient_id,
            }))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !response.ok {
            return Err(classify_error(
                &response.error.unwrap_or_default(),
                recipient_id,
                recurrence,
            ));
        }
        response
            .reminder
            .map(|r| r.id)
            .ok_or_else(|| ServiceError::Transport("reminders.add returned no reminder".into()))
    }
}

fn classify_error(code: &str, recipient_id: &str, recurrence: &str) -> ServiceError {
    match code {
        "ratelimited" | "rate_limited" => ServiceError::RateLimited,
        "cannot_parse" | "invalid_time" => ServiceError::InvalidRecurrence(recurrence.to_string()),
        "user_not_found" | "user_not_visible" => {
            ServiceError::UnknownRecipient(recipient_id.to_string())
        }
        other => ServiceError::Transport(other.to_string()),
    }
}

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Router};
use dotenvy::dotenv;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;

use bursar::commands::handlers::create_all_handlers;
use bursar::commands::{CommandContext, CommandInvocation, CommandRegistry};
use bursar::core::Config;
use bursar::features::ledger::{LedgerSource, SheetLedger};
use bursar::features::reminders::{NotificationService, ReminderRegistry, ReminderScheduler};
use bursar::features::roster::{ExactNameResolver, RosterSource};
use bursar::slack::SlackClient;

/// Shared state for the slash-command routes
#[derive(Clone)]
struct AppState {
    ctx: Arc<CommandContext>,
    commands: CommandRegistry,
    slack: Arc<SlackClient>,
}

/// Fields of a Slack slash-command form payload that the bot uses
#[derive(Debug, Deserialize)]
struct SlashPayload {
    user_id: String,
    channel_id: String,
    channel_name: String,
    #[serde(default)]
    text: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    info!(
        "bursar {} starting for team {}",
        env!("CARGO_PKG_VERSION"),
        config.team
    );

    let slack = Arc::new(SlackClient::new(
        config.slack_token.as_str(),
        config.user_slack_token.as_str(),
    ));

    let ledger: Arc<dyn LedgerSource> = Arc::new(SheetLedger::new(
        &config.spreadsheet_id,
        &config.sheet_name,
    ));
    let roster: Arc<dyn RosterSource> = Arc::clone(&slack) as Arc<dyn RosterSource>;
    let notifier: Arc<dyn NotificationService> = Arc::clone(&slack) as Arc<dyn NotificationService>;
    let registry = Arc::new(ReminderRegistry::new(
        config.default_reminder_time.as_str(),
    ));
    let scheduler = ReminderScheduler::new(
        Arc::clone(&ledger),
        Arc::clone(&roster),
        notifier,
        Arc::new(ExactNameResolver),
        Arc::clone(&registry),
        config.team.as_str(),
        config.treasurer_list(),
    );
    let ctx = Arc::new(CommandContext::new(
        ledger,
        roster,
        registry,
        scheduler,
        config.clone(),
    ));

    let mut commands = CommandRegistry::new();
    for handler in create_all_handlers() {
        commands.register(handler);
    }
    info!("{} commands registered", commands.len());

    let state = AppState {
        ctx,
        commands,
        slack,
    };

    let app = Router::new()
        .route("/:command", post(slash))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One route serves every slash command; Slack retries on non-200, so the
/// response is always OK and failures are logged instead.
async fn slash(
    State(state): State<AppState>,
    Path(command): Path<String>,
    Form(payload): Form<SlashPayload>,
) -> StatusCode {
    if let Err(err) = dispatch(&state, &command, &payload).await {
        error!("/{command} from {}: {err:#}", payload.user_id);
    }
    StatusCode::OK
}

async fn dispatch(state: &AppState, command: &str, payload: &SlashPayload) -> Result<()> {
    let actor_name = state.slack.user_real_name(&payload.user_id).await?;
    let invocation = CommandInvocation {
        actor_id: payload.user_id.clone(),
        actor_name,
        command: command.to_string(),
        text: payload.text.clone(),
    };

    let reply = match state.commands.get(command) {
        Some(handler) => match handler.handle(Arc::clone(&state.ctx), &invocation).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("/{command} handler failed: {err:#}");
                format!(
                    "The search you performed went wrong, please contact {} for troubleshooting",
                    state.ctx.config.treasurer_list()
                )
            }
        },
        None => format!("Unknown command /{command}. Try /commands."),
    };

    state
        .slack
        .send_reply(
            &payload.user_id,
            &payload.channel_name,
            &payload.channel_id,
            &reply,
        )
        .await
}

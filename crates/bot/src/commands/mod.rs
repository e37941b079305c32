//! Command dispatch — parse inbound chat messages, guard, route to handlers.

pub mod help;
pub mod logs;
pub mod restart;
pub mod status;
pub mod toggle;

use serenity::all::{Context, Message};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth;
use crate::client::DockerOps;
use crate::docker::client::DockerError;
use crate::state::SharedState;
use crate::suggest;

pub const PREFIX: char = '$';
pub const DEFAULT_LOG_LINES: usize = 50;
pub const MAX_LOG_LINES: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status { name: Option<String> },
    Logs { name: String, lines: usize },
    Restart { name: String },
    ToggleNotifications,
    Help,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Status { .. } => "status",
            Command::Logs { .. } => "logs",
            Command::Restart { .. } => "restart",
            Command::ToggleNotifications => "toggle_notifications",
            Command::Help => "help",
        }
    }

    /// The container this command is scoped to, if any. Drives the resource
    /// check in the authorization guard.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Command::Status { name } => name.as_deref(),
            Command::Logs { name, .. } | Command::Restart { name } => Some(name),
            Command::ToggleNotifications | Command::Help => None,
        }
    }
}

/// Outcome of parsing one inbound message.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Command(Command),
    /// Recognized verb, malformed invocation; the string is the correction
    /// shown to the user.
    Usage(String),
}

/// Parse message content into a command. `None` for anything that is not a
/// known `$`-prefixed verb; unknown verbs are silently ignored so the bot
/// can share a channel with other prefix bots.
pub fn parse(content: &str) -> Option<Parsed> {
    let rest = content.trim().strip_prefix(PREFIX)?;
    let mut words = rest.split_whitespace();
    let verb = words.next()?;
    let args: Vec<&str> = words.collect();

    match verb {
        "status" => Some(Parsed::Command(Command::Status {
            name: args.first().map(|s| s.to_string()),
        })),
        "logs" => {
            let Some(name) = args.first() else {
                return Some(Parsed::Usage(
                    "Missing container name. Usage: $logs <container> [lines]".to_string(),
                ));
            };
            let lines = match args.get(1) {
                None => DEFAULT_LOG_LINES,
                Some(raw) => match raw.parse::<usize>() {
                    Ok(n) if n > 0 => n.min(MAX_LOG_LINES),
                    _ => {
                        return Some(Parsed::Usage(
                            "Line count must be a positive number. Usage: $logs <container> [lines]"
                                .to_string(),
                        ))
                    }
                },
            };
            Some(Parsed::Command(Command::Logs {
                name: name.to_string(),
                lines,
            }))
        }
        "restart" => match args.first() {
            Some(name) => Some(Parsed::Command(Command::Restart {
                name: name.to_string(),
            })),
            None => Some(Parsed::Usage(
                "Missing container name. Usage: $restart <container>".to_string(),
            )),
        },
        "toggle_notifications" => Some(Parsed::Command(Command::ToggleNotifications)),
        "help" => Some(Parsed::Command(Command::Help)),
        _ => None,
    }
}

/// Faults escaping a command handler. Everything lands in the dispatch fault
/// boundary; nothing propagates further.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Entry point for one inbound message: parse, authorize, run the handler
/// inside the fault boundary.
pub async fn dispatch(ctx: &Context, msg: &Message, state: &SharedState) {
    let command = match parse(&msg.content) {
        None => return,
        Some(Parsed::Usage(correction)) => {
            reply_text(ctx, msg, &correction).await;
            return;
        }
        Some(Parsed::Command(command)) => command,
    };

    let caller = msg.author.id.get();
    if let Err(denied) = auth::authorize(&state.config, caller, msg.channel_id.get(), command.resource())
    {
        info!(
            command = command.verb(),
            caller,
            "Command denied: {}", denied
        );
        reply_text(ctx, msg, &denied.to_string()).await;
        return;
    }

    let result = match command.clone() {
        Command::Status { name } => status::run(ctx, msg, state, name).await,
        Command::Logs { name, lines } => logs::run(ctx, msg, state, &name, lines).await,
        Command::Restart { name } => restart::run(ctx, msg, state, &name).await,
        Command::ToggleNotifications => toggle::run(ctx, msg, state).await,
        Command::Help => help::run(ctx, msg).await,
    };

    if let Err(e) = result {
        error!(
            command = command.verb(),
            caller,
            resource = ?command.resource(),
            error = %e,
            "Command handler failed"
        );
        reply_text(ctx, msg, "❌ An error occurred while handling the command.").await;
    }
}

/// Reply helper that only logs delivery failures; used for replies that are
/// themselves the error path.
pub(crate) async fn reply_text(ctx: &Context, msg: &Message, text: &str) {
    if let Err(e) = msg.reply(&ctx.http, text).await {
        warn!(error = %e, "Failed to send reply");
    }
}

/// Not-found reply with a typo hint. Candidate names come from the live
/// listing, scoped to the monitored set.
pub(crate) async fn not_found_reply(state: &SharedState, name: &str) -> String {
    let hints = suggest::suggest(name, &known_names(state).await);
    if hints.is_empty() {
        format!("❌ Container '{}' not found.", name)
    } else {
        let formatted: Vec<String> = hints.iter().map(|h| format!("`{}`", h)).collect();
        format!(
            "❌ Container '{}' not found. Did you mean: {}?",
            name,
            formatted.join(", ")
        )
    }
}

async fn known_names(state: &SharedState) -> Vec<String> {
    match state.docker.list_containers().await {
        Ok(list) => list
            .into_iter()
            .map(|c| c.name)
            .filter(|n| state.config.monitors(n))
            .collect(),
        Err(e) => {
            warn!(error = %e, "Failed to list containers for suggestions");
            Vec::new()
        }
    }
}

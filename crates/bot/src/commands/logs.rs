//! `$logs` — bounded, chunked log tails.

use serenity::all::{Context, EditMessage, Message};

use super::{not_found_reply, CommandError};
use crate::chunk::format_log_chunks;
use crate::client::DockerOps;
use crate::state::SharedState;

#[derive(Debug)]
pub enum LogsReply {
    Chunks(Vec<String>),
    NotFound { message: String },
}

/// Fetch and format the tail. Separated from rendering so it can be
/// exercised against the fake client.
pub async fn fetch(
    state: &SharedState,
    name: &str,
    lines: usize,
) -> Result<LogsReply, CommandError> {
    match state.docker.tail_logs(name, lines).await {
        Ok(log_lines) => {
            let rendered: Vec<String> = log_lines.iter().map(|l| l.display()).collect();
            Ok(LogsReply::Chunks(format_log_chunks(&rendered)))
        }
        Err(e) if e.is_not_found() => Ok(LogsReply::NotFound {
            message: not_found_reply(state, name).await,
        }),
        Err(e) => Err(e.into()),
    }
}

pub async fn run(
    ctx: &Context,
    msg: &Message,
    state: &SharedState,
    name: &str,
    lines: usize,
) -> Result<(), CommandError> {
    let mut loading = msg
        .reply(&ctx.http, format!("📋 Retrieving logs for '{}'...", name))
        .await?;

    match fetch(state, name, lines).await? {
        LogsReply::NotFound { message } => {
            loading
                .edit(&ctx.http, EditMessage::new().content(message))
                .await?;
        }
        LogsReply::Chunks(chunks) => {
            loading
                .edit(
                    &ctx.http,
                    EditMessage::new()
                        .content(format!("📋 **'{}' logs (last {} lines):**", name, lines)),
                )
                .await?;
            for chunk in chunks {
                msg.channel_id.say(&ctx.http, chunk).await?;
            }
        }
    }
    Ok(())
}

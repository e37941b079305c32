//! `$restart` — restart with a short grace period before confirming.

use std::time::Duration;

use serenity::all::{Context, EditMessage, Message};

use super::{not_found_reply, CommandError};
use crate::client::DockerOps;
use crate::state::SharedState;

#[derive(Debug)]
pub enum RestartReply {
    Restarted { name: String },
    /// The container came back in some state other than running. Not
    /// necessarily an error; restart can legitimately leave a container in a
    /// transient state.
    SettledAs { name: String, state: String },
    NotFound { message: String },
}

/// Resolve, restart, wait out the grace period, and re-check. A name that
/// does not resolve never reaches the restart API.
pub async fn perform(state: &SharedState, name: &str) -> Result<RestartReply, CommandError> {
    match state.docker.inspect_container(name).await {
        Err(e) if e.is_not_found() => {
            return Ok(RestartReply::NotFound {
                message: not_found_reply(state, name).await,
            })
        }
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }

    state.docker.restart_container(name, None).await?;

    // Single fixed wait, not a retry loop. A slow runtime gets its observed
    // status reported instead of an error.
    tokio::time::sleep(Duration::from_secs(state.config.restart_grace_secs)).await;

    let info = state.docker.inspect_container(name).await?;
    if info.is_running() {
        Ok(RestartReply::Restarted {
            name: name.to_string(),
        })
    } else {
        Ok(RestartReply::SettledAs {
            name: name.to_string(),
            state: info.state,
        })
    }
}

pub async fn run(
    ctx: &Context,
    msg: &Message,
    state: &SharedState,
    name: &str,
) -> Result<(), CommandError> {
    let mut loading = msg
        .reply(&ctx.http, format!("🔄 Restarting container '{}'...", name))
        .await?;

    let content = match perform(state, name).await? {
        RestartReply::Restarted { name } => {
            format!("✅ Container '{}' successfully restarted!", name)
        }
        RestartReply::SettledAs { name, state } => {
            format!("⚠️ Container '{}' status: {}", name, state)
        }
        RestartReply::NotFound { message } => message,
    };
    loading
        .edit(&ctx.http, EditMessage::new().content(content))
        .await?;
    Ok(())
}

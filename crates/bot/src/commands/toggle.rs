//! `$toggle_notifications` — flip event forwarding on or off.

use serenity::all::{Context, Message};

use super::CommandError;
use crate::state::SharedState;

pub async fn run(ctx: &Context, msg: &Message, state: &SharedState) -> Result<(), CommandError> {
    let enabled = state.toggle_events();
    let text = if enabled {
        "🔔 Container event notifications enabled."
    } else {
        "🔕 Container event notifications disabled."
    };
    msg.reply(&ctx.http, text).await?;
    Ok(())
}

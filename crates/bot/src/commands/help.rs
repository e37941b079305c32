//! `$help` — static capability listing.

use serenity::all::{Colour, Context, CreateEmbed, CreateMessage, Message};

use super::CommandError;

pub async fn run(ctx: &Context, msg: &Message) -> Result<(), CommandError> {
    let embed = CreateEmbed::new()
        .title("🤖 Container bot commands")
        .description("Available commands for managing Docker containers")
        .colour(Colour::BLUE)
        .field(
            "$status [container]",
            "Show status of all monitored containers, or a specific one",
            false,
        )
        .field(
            "$logs <container> [lines]",
            "Fetch the last lines of a container's logs (default: 50, max: 2000)",
            false,
        )
        .field("$restart <container>", "Restart a container", false)
        .field(
            "$toggle_notifications",
            "Turn container start/die notifications on or off",
            false,
        )
        .field("$help", "Print this help message", false);

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}

//! Gateway — serenity client wiring and the inbound event handler.
//!
//! Connection lifecycle (login, reconnect, intents) belongs to serenity;
//! this module only reacts to `ready` and `message`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::all::{ChannelId, Client, Context, EventHandler, GatewayIntents, GuildId, Message, Ready};
use serenity::async_trait;
use tracing::{info, warn};

use crate::bridge;
use crate::commands;
use crate::conf::BotConfig;
use crate::state::SharedState;

struct Handler {
    state: SharedState,
    bridge_started: AtomicBool,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} connected to Discord", ready.user.name);

        let config = &self.state.config;
        if config.guild_id != 0 {
            let expected = GuildId::new(config.guild_id);
            if !ready.guilds.iter().any(|g| g.id == expected) {
                warn!("Configured guild {} not in session guild list", config.guild_id);
            }
        }

        if config.channel_id == 0 {
            warn!("No notification channel configured; event bridge not started");
            return;
        }
        let channel = ChannelId::new(config.channel_id);

        // Startup announcement goes out before the bridge starts forwarding.
        if let Err(e) = channel.say(&ctx.http, "🤖 Container monitor bot started").await {
            warn!(error = %e, "Failed to send startup announcement");
        }

        // The gateway fires `ready` again after reconnects; the bridge must
        // only ever run once.
        if !self.bridge_started.swap(true, Ordering::SeqCst) {
            let state = Arc::clone(&self.state);
            let http = Arc::clone(&ctx.http);
            tokio::spawn(async move {
                bridge::run(state, http, channel).await;
            });
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        commands::dispatch(&ctx, &msg, &self.state).await;
    }
}

/// Build the serenity client and run it until shutdown.
pub async fn run(state: SharedState, config: BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler {
        state,
        bridge_started: AtomicBool::new(false),
    };

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    info!("Connecting to the Discord gateway");
    client.start().await?;
    Ok(())
}

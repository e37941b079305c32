//! `$status` — one container, or the whole monitored fleet.

use serenity::all::{Colour, Context, CreateEmbed, CreateMessage, Message};

use super::{not_found_reply, CommandError};
use crate::client::DockerOps;
use crate::docker::inventory::ContainerInfo;
use crate::state::SharedState;

#[derive(Debug)]
pub enum StatusReply {
    Single(ContainerInfo),
    Overview {
        running: Vec<String>,
        stopped: Vec<String>,
    },
    NotFound {
        message: String,
    },
    Empty,
}

/// Resolve the reply data. Separated from rendering so it can be exercised
/// against the fake client.
pub async fn query(state: &SharedState, name: Option<&str>) -> Result<StatusReply, CommandError> {
    match name {
        Some(name) => match state.docker.inspect_container(name).await {
            Ok(info) => Ok(StatusReply::Single(info)),
            Err(e) if e.is_not_found() => Ok(StatusReply::NotFound {
                message: not_found_reply(state, name).await,
            }),
            Err(e) => Err(e.into()),
        },
        None => {
            let mut containers = state.docker.list_containers().await?;
            containers.retain(|c| state.config.monitors(&c.name));
            if containers.is_empty() {
                return Ok(StatusReply::Empty);
            }

            let mut running = Vec::new();
            let mut stopped = Vec::new();
            for container in containers {
                if container.is_running() {
                    running.push(format!("🟢 {}", container.name));
                } else {
                    stopped.push(format!("🔴 {} ({})", container.name, container.state));
                }
            }
            Ok(StatusReply::Overview { running, stopped })
        }
    }
}

pub async fn run(
    ctx: &Context,
    msg: &Message,
    state: &SharedState,
    name: Option<String>,
) -> Result<(), CommandError> {
    match query(state, name.as_deref()).await? {
        StatusReply::Single(info) => {
            let colour = if info.is_running() {
                Colour::DARK_GREEN
            } else {
                Colour::RED
            };
            let embed = CreateEmbed::new()
                .title(format!("Container status: {}", info.name))
                .colour(colour)
                .field("Status", info.state.clone(), true)
                .field("Created", info.created_display(), true);
            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await?;
        }
        StatusReply::Overview { running, stopped } => {
            let mut embed = CreateEmbed::new()
                .title("Container status")
                .colour(Colour::BLUE);
            if !running.is_empty() {
                embed = embed.field("Running", running.join("\n"), false);
            }
            if !stopped.is_empty() {
                embed = embed.field("Stopped", stopped.join("\n"), false);
            }
            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await?;
        }
        StatusReply::NotFound { message } => {
            msg.reply(&ctx.http, message).await?;
        }
        StatusReply::Empty => {
            msg.reply(&ctx.http, "📋 No containers found.").await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeDocker;
    use crate::conf::BotConfig;
    use crate::state::BotState;
    use std::sync::Arc;

    fn state_with(fake: FakeDocker, config: BotConfig) -> SharedState {
        Arc::new(BotState::new(Arc::new(fake), config))
    }

    #[tokio::test]
    async fn test_single_container_found() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));
        let state = state_with(fake, BotConfig::default());

        match query(&state, Some("web")).await.unwrap() {
            StatusReply::Single(info) => {
                assert_eq!(info.name, "web");
                assert!(info.is_running());
            }
            other => panic!("expected Single, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_container_not_found_carries_suggestion() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));
        let state = state_with(fake, BotConfig::default());

        match query(&state, Some("wbe")).await.unwrap() {
            StatusReply::NotFound { message } => {
                assert!(message.contains("`web`"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overview_partitions_running_and_stopped() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));
        fake.add_container(FakeDocker::container("db", "exited"));
        fake.add_container(FakeDocker::container("cache", "paused"));
        let state = state_with(fake, BotConfig::default());

        match query(&state, None).await.unwrap() {
            StatusReply::Overview { running, stopped } => {
                assert_eq!(running, vec!["🟢 web"]);
                assert_eq!(stopped, vec!["🔴 db (exited)", "🔴 cache (paused)"]);
            }
            other => panic!("expected Overview, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overview_scoped_to_monitored_set() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));
        fake.add_container(FakeDocker::container("db", "running"));
        fake.add_container(FakeDocker::container("cache", "running"));
        let config = BotConfig {
            monitored_containers: vec!["web".to_string(), "db".to_string()],
            ..Default::default()
        };
        let state = state_with(fake, config);

        match query(&state, None).await.unwrap() {
            StatusReply::Overview { running, .. } => {
                assert_eq!(running, vec!["🟢 web", "🟢 db"]);
            }
            other => panic!("expected Overview, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overview_empty() {
        let state = state_with(FakeDocker::new(), BotConfig::default());
        assert!(matches!(
            query(&state, None).await.unwrap(),
            StatusReply::Empty
        ));
    }
}

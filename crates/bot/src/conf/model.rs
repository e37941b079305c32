//! Model — BotConfig and related defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Discord bot token. Required; startup fails without it.
    pub discord_token: String,
    /// Target server id. 0 skips the guild presence check.
    pub guild_id: u64,
    /// Command and notification channel. 0 accepts commands from any channel
    /// and leaves the event bridge without a destination.
    pub channel_id: u64,
    /// User ids allowed to run commands. Empty allows everyone.
    pub authorized_users: Vec<u64>,
    /// Container names in scope for status aggregation and event
    /// forwarding. Empty puts every container in scope.
    pub monitored_containers: Vec<String>,
    /// Initial state of the notification toggle.
    pub events_enabled: bool,
    pub docker_socket: String,
    /// Wait after a restart before re-checking container state.
    pub restart_grace_secs: u64,
    /// Trailing log lines forwarded after a die event.
    pub die_log_tail: usize,
    /// Bound on the event relay queue between the stream reader and the
    /// forwarding loop.
    pub event_queue_depth: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            guild_id: 0,
            channel_id: 0,
            authorized_users: Vec::new(),
            monitored_containers: Vec::new(),
            events_enabled: true,
            docker_socket: String::new(),
            restart_grace_secs: 3,
            die_log_tail: 10,
            event_queue_depth: 256,
        }
    }
}

impl BotConfig {
    /// Whether `name` is in scope. An empty monitored set means everything is.
    pub fn monitors(&self, name: &str) -> bool {
        self.monitored_containers.is_empty() || self.monitored_containers.iter().any(|m| m == name)
    }

    /// True when the allow-list is empty and every user may run commands.
    pub fn open_to_everyone(&self) -> bool {
        self.authorized_users.is_empty()
    }

    /// Validate configuration values that would break the bot at runtime.
    pub fn validate(&self) -> Result<(), String> {
        if self.discord_token.is_empty() {
            return Err("DISCORD_TOKEN is not configured".to_string());
        }
        if self.event_queue_depth == 0 {
            return Err("event_queue_depth must be > 0".to_string());
        }
        if self.die_log_tail == 0 {
            return Err("die_log_tail must be > 0".to_string());
        }
        Ok(())
    }
}

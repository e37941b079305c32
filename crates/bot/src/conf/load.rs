//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::BotConfig;

impl BotConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("DOCKHAND_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/dockhand/bot.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: BotConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables alone.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("DISCORD_TOKEN") {
            self.discord_token = token;
        }
        if let Some(id) = env_parse("DISCORD_GUILD_ID") {
            self.guild_id = id;
        }
        if let Some(id) = env_parse("DISCORD_CHANNEL_ID") {
            self.channel_id = id;
        }
        if let Ok(raw) = std::env::var("AUTHORIZED_USERS") {
            self.authorized_users = parse_id_list(&raw);
        }
        if let Ok(raw) = std::env::var("MONITORED_CONTAINERS") {
            self.monitored_containers = parse_name_list(&raw);
        }
        if let Some(enabled) = env_parse("CONTAINER_EVENTS_ENABLED") {
            self.events_enabled = enabled;
        }
        if let Ok(socket) = std::env::var("DOCKER_SOCKET") {
            self.docker_socket = socket;
        }
        if let Some(secs) = env_parse("DOCKHAND_RESTART_GRACE_SECS") {
            self.restart_grace_secs = secs;
        }
        if let Some(tail) = env_parse("DOCKHAND_DIE_LOG_TAIL") {
            self.die_log_tail = tail;
        }
        if let Some(depth) = env_parse("DOCKHAND_EVENT_QUEUE_DEPTH") {
            self.event_queue_depth = depth;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

/// Parse a comma-separated id list. Empty segments and junk are skipped, so
/// `AUTHORIZED_USERS=""` yields an empty (permissive) set rather than a set
/// containing the empty string.
pub(crate) fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            match part.parse() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!("Ignoring malformed user id in allow-list: {:?}", part);
                    None
                }
            }
        })
        .collect()
}

/// Parse a comma-separated name list, trimming whitespace and dropping empty
/// segments.
pub(crate) fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

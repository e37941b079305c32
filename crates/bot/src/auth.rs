//! Authorization guard — allow-list, channel restriction, monitored scope.

use thiserror::Error;

use crate::conf::BotConfig;

/// Why a command was refused. The `Display` text doubles as the chat reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Denied {
    #[error("❌ Not authorized to use this command.")]
    NotAuthorized,
    #[error("❌ Cannot use this command in this channel.")]
    WrongChannel,
    #[error("❌ Container '{0}' is not monitored by this bot.")]
    NotMonitored(String),
}

/// Decide whether `caller` may run a command from `channel`, optionally
/// scoped to a named container.
///
/// Pure and side-effect-free. Checks run in a fixed order and the first
/// violation wins: the caller allow-list (empty allows everyone), the origin
/// channel (0 accepts any channel), then the monitored-set membership of the
/// named resource.
pub fn authorize(
    config: &BotConfig,
    caller: u64,
    channel: u64,
    resource: Option<&str>,
) -> Result<(), Denied> {
    if !config.authorized_users.is_empty() && !config.authorized_users.contains(&caller) {
        return Err(Denied::NotAuthorized);
    }
    if config.channel_id != 0 && channel != config.channel_id {
        return Err(Denied::WrongChannel);
    }
    if let Some(name) = resource {
        if !config.monitors(name) {
            return Err(Denied::NotMonitored(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted_config() -> BotConfig {
        BotConfig {
            authorized_users: vec![100, 200],
            channel_id: 555,
            monitored_containers: vec!["web".to_string(), "db".to_string()],
            ..Default::default()
        }
    }

    // ── Allow-list ───────────────────────────────────────────────

    #[test]
    fn test_listed_user_allowed() {
        assert!(authorize(&restricted_config(), 100, 555, None).is_ok());
    }

    #[test]
    fn test_unlisted_user_denied() {
        assert_eq!(
            authorize(&restricted_config(), 999, 555, None),
            Err(Denied::NotAuthorized)
        );
    }

    #[test]
    fn test_empty_allow_list_is_open() {
        let config = BotConfig::default();
        assert!(authorize(&config, 12345, 0, None).is_ok());
    }

    // ── Channel restriction ──────────────────────────────────────

    #[test]
    fn test_wrong_channel_denied() {
        assert_eq!(
            authorize(&restricted_config(), 100, 556, None),
            Err(Denied::WrongChannel)
        );
    }

    #[test]
    fn test_unset_channel_accepts_any() {
        let config = BotConfig {
            authorized_users: vec![100],
            ..Default::default()
        };
        assert!(authorize(&config, 100, 42, None).is_ok());
        assert!(authorize(&config, 100, 43, None).is_ok());
    }

    #[test]
    fn test_wrong_channel_denied_even_for_authorized_user() {
        // Channel restriction applies regardless of the allow-list.
        let config = restricted_config();
        assert_eq!(
            authorize(&config, 100, 1, Some("web")),
            Err(Denied::WrongChannel)
        );
    }

    // ── Resource scope ───────────────────────────────────────────

    #[test]
    fn test_monitored_resource_allowed() {
        assert!(authorize(&restricted_config(), 100, 555, Some("web")).is_ok());
    }

    #[test]
    fn test_unmonitored_resource_denied() {
        assert_eq!(
            authorize(&restricted_config(), 100, 555, Some("cache")),
            Err(Denied::NotMonitored("cache".to_string()))
        );
    }

    #[test]
    fn test_empty_monitored_set_allows_any_resource() {
        let config = BotConfig {
            authorized_users: vec![100],
            channel_id: 555,
            ..Default::default()
        };
        assert!(authorize(&config, 100, 555, Some("anything")).is_ok());
    }

    #[test]
    fn test_no_resource_skips_scope_check() {
        assert!(authorize(&restricted_config(), 100, 555, None).is_ok());
    }

    // ── Short-circuit order ──────────────────────────────────────

    #[test]
    fn test_identity_check_wins_over_channel_and_scope() {
        // Unauthorized caller, wrong channel, unmonitored resource: the
        // identity failure is reported.
        assert_eq!(
            authorize(&restricted_config(), 999, 1, Some("cache")),
            Err(Denied::NotAuthorized)
        );
    }

    #[test]
    fn test_channel_check_wins_over_scope() {
        assert_eq!(
            authorize(&restricted_config(), 100, 1, Some("cache")),
            Err(Denied::WrongChannel)
        );
    }
}

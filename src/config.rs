//! Configuration loading and management.
//!
//! Loads an optional TOML config file from the platform config directory,
//! with environment variable overrides for the Slack credentials.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, warn};

/// Config file name inside the project config directory.
const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub slack: SlackConfig,
}

/// Slack notification credentials.
///
/// Notification is attempted only when both fields are non-empty; there is
/// no separate enable flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub channel: String,
}

impl Config {
    /// Path to the config file.
    ///
    /// Resolves to `~/.config/pamjit/config.toml` on Linux.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pamjit", "pamjit")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load configuration from disk with environment variable overrides.
    ///
    /// A missing or unparseable file yields the default (empty)
    /// configuration: notification is optional and must never block a grant
    /// request.
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();

        if let Ok(token) = env::var("SLACK_TOKEN") {
            config.slack.token = token;
        }

        if let Ok(channel) = env::var("SLACK_CHANNEL") {
            config.slack.channel = channel;
        }

        config
    }

    fn load_file() -> Option<Self> {
        let path = Self::path()?;
        if !path.exists() {
            debug!("Config file {:?} does not exist, using defaults", path);
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}, using defaults", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}, using defaults", path, e);
                None
            }
        }
    }

    /// True when both Slack fields are set.
    ///
    /// The single predicate gating the notification path.
    pub fn notification_enabled(&self) -> bool {
        !self.slack.token.is_empty() && !self.slack.channel.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let config: Config = toml::from_str(
            r#"
            [slack]
            token = "xoxb-test"
            channel = "C123"
            "#,
        )
        .unwrap();

        assert_eq!(config.slack.token, "xoxb-test");
        assert_eq!(config.slack.channel, "C123");
        assert!(config.notification_enabled());
    }

    #[test]
    fn test_empty_config_disables_notification() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.notification_enabled());
    }

    #[test]
    fn test_notification_requires_both_fields() {
        let mut config = Config::default();
        assert!(!config.notification_enabled());

        config.slack.token = "xoxb-test".to_string();
        assert!(!config.notification_enabled());

        config.slack.channel = "C123".to_string();
        assert!(config.notification_enabled());

        config.slack.token.clear();
        assert!(!config.notification_enabled());
    }

    #[test]
    fn test_config_path() {
        let path = Config::path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("config.toml"));
    }
}

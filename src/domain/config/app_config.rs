//! Application configuration value object

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::domain::alert::DEFAULT_TITLE;
use crate::domain::session::DEFAULT_TARGET_UID;

/// Port the receiver listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 9000;

/// The receiver only ever binds to loopback
pub const BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Notifier invoked for every alert
pub const DEFAULT_NOTIFY_COMMAND: &str = "notify-send";

/// Command used to run the notifier as the desktop user
pub const DEFAULT_IDENTITY_SWITCH_COMMAND: &str = "sudo";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub port: Option<u16>,
    pub notify_command: Option<String>,
    pub identity_switch_command: Option<String>,
    pub fallback_uid: Option<u32>,
    pub default_title: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            port: Some(DEFAULT_PORT),
            notify_command: Some(DEFAULT_NOTIFY_COMMAND.to_string()),
            identity_switch_command: Some(DEFAULT_IDENTITY_SWITCH_COMMAND.to_string()),
            fallback_uid: Some(DEFAULT_TARGET_UID),
            default_title: Some(DEFAULT_TITLE.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            port: other.port.or(self.port),
            notify_command: other.notify_command.or(self.notify_command),
            identity_switch_command: other
                .identity_switch_command
                .or(self.identity_switch_command),
            fallback_uid: other.fallback_uid.or(self.fallback_uid),
            default_title: other.default_title.or(self.default_title),
        }
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Loopback socket address for the configured port
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(BIND_ADDR, self.port_or_default())
    }

    pub fn notify_command_or_default(&self) -> &str {
        self.notify_command
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_NOTIFY_COMMAND)
    }

    pub fn identity_switch_command_or_default(&self) -> &str {
        self.identity_switch_command
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_IDENTITY_SWITCH_COMMAND)
    }

    pub fn fallback_uid_or_default(&self) -> u32 {
        self.fallback_uid.unwrap_or(DEFAULT_TARGET_UID)
    }

    pub fn default_title_or_default(&self) -> &str {
        self.default_title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.notify_command.as_deref(), Some("notify-send"));
        assert_eq!(config.identity_switch_command.as_deref(), Some("sudo"));
        assert_eq!(config.fallback_uid, Some(1000));
        assert_eq!(config.default_title.as_deref(), Some("S3NS3 Alert"));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.port.is_none());
        assert!(config.notify_command.is_none());
        assert!(config.fallback_uid.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let cli = AppConfig {
            port: Some(9100),
            ..Default::default()
        };
        let merged = AppConfig::defaults().merge(cli);
        assert_eq!(merged.port, Some(9100));
        assert_eq!(merged.notify_command.as_deref(), Some("notify-send"));
    }

    #[test]
    fn accessors_fall_back_on_empty() {
        let config = AppConfig::empty();
        assert_eq!(config.port_or_default(), 9000);
        assert_eq!(config.notify_command_or_default(), "notify-send");
        assert_eq!(config.identity_switch_command_or_default(), "sudo");
        assert_eq!(config.fallback_uid_or_default(), 1000);
        assert_eq!(config.default_title_or_default(), "S3NS3 Alert");
    }

    #[test]
    fn empty_notify_command_is_ignored() {
        let config = AppConfig {
            notify_command: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.notify_command_or_default(), "notify-send");
    }

    #[test]
    fn listen_addr_is_loopback() {
        let config = AppConfig {
            port: Some(9123),
            ..Default::default()
        };
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9123");
    }
}

use std::{fs, path::Path, time::Duration};

use anyhow::Context as _;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "./air-hue.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub memory_update: MemoryUpdate,
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub i2c: I2cConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    pub host: String,
    pub username: String,
    pub light_id: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct I2cConfig {
    pub bus: u8,
}

/// When the debounce memory takes a dispatched state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryUpdate {
    /// After every dispatch attempt, failed or not.
    #[default]
    Always,
    /// Only after the controller acknowledged it.
    OnSuccess,
}

impl Default for I2cConfig {
    fn default() -> Self {
        I2cConfig { bus: 1 }
    }
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl BridgeConfig {
    pub fn state_url(&self) -> String {
        format!(
            "http://{}/api/{}/lights/{}/state",
            self.host, self.username, self.light_id
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [bridge]
            host = "192.168.0.241"
            username = "token"
            light_id = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.memory_update, MemoryUpdate::Always);
        assert_eq!(config.i2c.bus, 1);
        assert_eq!(config.bridge.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            poll_interval_secs = 30
            memory_update = "on-success"

            [bridge]
            host = "hue.local"
            username = "token"
            light_id = 7
            timeout_secs = 3

            [i2c]
            bus = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.memory_update, MemoryUpdate::OnSuccess);
        assert_eq!(config.i2c.bus, 0);
        assert_eq!(config.bridge.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_state_url() {
        let bridge = BridgeConfig {
            host: "192.168.0.241".to_string(),
            username: "token".to_string(),
            light_id: 2,
            timeout_secs: 10,
        };
        assert_eq!(
            bridge.state_url(),
            "http://192.168.0.241/api/token/lights/2/state"
        );
    }

    #[test]
    fn test_missing_bridge_is_rejected() {
        assert!(toml::from_str::<Config>("poll_interval_secs = 5").is_err());
    }
}

//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::Difficulty;
use crate::protocol::DEFAULT_GATEWAY_URL;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    /// `None` waits for the gateway indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// An `EnvFilter` directive such as `info` or `vocab_quiz=debug`.
    pub level: String,
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub log: LogConfig,
    pub difficulty: Difficulty,
    /// Optional file whose contents prefill the word list.
    pub words_file: Option<PathBuf>,
}

impl Config {
    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.gateway.timeout = secs.filter(|s| *s > 0).map(Duration::from_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://localhost:3000");
        assert_eq!(config.gateway.timeout, None);
        assert_eq!(config.difficulty, Difficulty::PrimaryUpper);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        assert_eq!(Config::default().with_timeout_secs(Some(0)).gateway.timeout, None);
        assert_eq!(
            Config::default().with_timeout_secs(Some(30)).gateway.timeout,
            Some(Duration::from_secs(30))
        );
    }
}

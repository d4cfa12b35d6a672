//! Environment-driven configuration

use crate::error::{HandleScoutError, Result};
use crate::types::{Platform, ProbeConfig};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// A configured third-party lookup API for one platform
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    pub url: String,
    pub api_key: Option<String>,
}

/// Application configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram bot token; absent until the operator exports it
    pub telegram_token: Option<String>,
    /// Return deterministic mock data instead of hitting the network
    pub mock_mode: bool,
    /// Pattern probing knobs
    pub probe: ProbeConfig,
    /// Number of mock accounts generated per contact lookup (clamped 1..=50)
    pub mock_count: usize,
    /// Per-platform lookup APIs, when configured
    pub api_endpoints: HashMap<Platform, ApiEndpoint>,
    /// Path of the JSON user-data file
    pub store_path: PathBuf,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// Unset or unparseable values fall back to defaults; only the bot token
    /// is checked later, at startup.
    pub fn from_env() -> Self {
        let probe = ProbeConfig {
            max_len: env_usize("PROBE_MAX_LEN", 2),
            concurrency: env_usize("PROBE_CONCURRENCY", 5),
            timeout: Duration::from_secs(env_usize("PROBE_TIMEOUT_SECS", 10) as u64),
            candidate_limit: env_usize("PROBE_CANDIDATE_LIMIT", 200),
        };

        let mut api_endpoints = HashMap::new();
        for platform in Platform::ALL {
            let prefix = platform.as_str().to_uppercase();
            if let Ok(url) = env::var(format!("{}_API_URL", prefix)) {
                if !url.trim().is_empty() {
                    api_endpoints.insert(
                        platform,
                        ApiEndpoint {
                            url,
                            api_key: env::var(format!("{}_API_KEY", prefix)).ok(),
                        },
                    );
                }
            }
        }

        Self {
            telegram_token: env::var("TELEGRAM_BOT_API_TOKEN").ok(),
            mock_mode: env_flag("MOCK_MODE"),
            probe,
            mock_count: env_usize("TIKTOK_MOCK_COUNT", 5).clamp(1, 50),
            api_endpoints,
            store_path: env::var("USER_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("user_data.json")),
        }
    }

    /// The bot token, or a configuration error telling the operator how to set it
    pub fn require_token(&self) -> Result<&str> {
        self.telegram_token.as_deref().ok_or_else(|| {
            HandleScoutError::config(
                "No Telegram token found. Set the TELEGRAM_BOT_API_TOKEN environment variable with your bot token",
            )
        })
    }

    /// Lookup API configured for a platform, if any
    pub fn api_for(&self, platform: Platform) -> Option<&ApiEndpoint> {
        self.api_endpoints.get(&platform)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_token: None,
            mock_mode: false,
            probe: ProbeConfig::default(),
            mock_count: 5,
            api_endpoints: HashMap::new(),
            store_path: PathBuf::from("user_data.json"),
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.mock_mode);
        assert_eq!(config.probe.concurrency, 5);
        assert_eq!(config.mock_count, 5);
        assert!(config.api_endpoints.is_empty());
        assert!(config.require_token().is_err());
    }
}

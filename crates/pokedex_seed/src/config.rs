//! Runtime configuration for a seeding run.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "data/pokedex.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Root of the upstream API, without trailing slash.
    pub base_url: String,
    /// Pause honored between consecutive upstream calls.
    pub request_delay: Duration,
    /// Per-call timeout. Timed out calls are not retried.
    pub request_timeout: Duration,
    /// Pokedex file read and rewritten by the run.
    pub output_path: PathBuf,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl SeedConfig {
    /// Defaults overlaid with `POKEAPI_BASE_URL`, `POKEDEX_SEED_DELAY_MS`,
    /// `POKEDEX_SEED_TIMEOUT_SECS` and `POKEDEX_OUTPUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SeedConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("POKEAPI_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("POKEDEX_SEED_DELAY_MS") {
            config.request_delay = Duration::from_millis(parse_u64("POKEDEX_SEED_DELAY_MS", &raw)?);
        }
        if let Some(raw) = lookup("POKEDEX_SEED_TIMEOUT_SECS") {
            let secs = parse_u64("POKEDEX_SEED_TIMEOUT_SECS", &raw)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "POKEDEX_SEED_TIMEOUT_SECS",
                    value: raw,
                    message: "timeout must be positive".to_string(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("POKEDEX_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        message: e.to_string(),
    })
}

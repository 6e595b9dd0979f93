//! Application configuration

use std::env;

use anyhow::{Context, Result};

const DEFAULT_LOG_FILTER: &str = "nexus_engine=debug";

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Seed for the die RNG; entropy when absent
    pub rng_seed: Option<u64>,
    /// Reject executing options the character cannot access
    pub enforce_option_access: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            rng_seed: None,
            enforce_option_access: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            log_filter: lookup("NEXUS_LOG_FILTER")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),

            rng_seed: lookup("NEXUS_RNG_SEED")
                .map(|seed| seed.trim().parse::<u64>())
                .transpose()
                .context("NEXUS_RNG_SEED must be an unsigned integer")?,

            enforce_option_access: lookup("NEXUS_ENFORCE_OPTION_ACCESS")
                .map(|flag| parse_flag(&flag))
                .transpose()
                .context("NEXUS_ENFORCE_OPTION_ACCESS must be true or false")?
                .unwrap_or(true),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}

//! Configuration types for oddsboard

use crate::board::{BoardParams, POPULAR_BOOKMAKERS};
use crate::feed::{DEFAULT_SPORTS, ODDS_API_URL};
use crate::odds::MarketType;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "ODDS_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Odds API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct OddsApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key; `ODDS_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
    /// Bookmaker regions (e.g. "us", "us,uk")
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Only "american" is supported
    #[serde(default = "default_odds_format")]
    pub odds_format: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    ODDS_API_URL.to_string()
}
fn default_regions() -> String {
    "us".to_string()
}
fn default_odds_format() -> String {
    "american".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            regions: default_regions(),
            odds_format: default_odds_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OddsApiConfig {
    /// API key from the environment or the config file
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

fn resolve_api_key(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.or_else(|| configured.map(str::to_string))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Odds board defaults
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub market: MarketType,
    /// Bankroll for Kelly sizing; absent or non-positive disables sizing
    #[serde(default)]
    pub bankroll: Option<Decimal>,
    /// Selected bookmaker keys
    #[serde(default = "default_bookmakers")]
    pub bookmakers: Vec<String>,
    /// Team-name search
    #[serde(default)]
    pub search: Option<String>,
    /// Sport key filter used when no search is given
    #[serde(default)]
    pub sport: Option<String>,
    /// Sports fetched together when no sport is selected
    #[serde(default = "default_sports")]
    pub sports: Vec<String>,
}

fn default_bookmakers() -> Vec<String> {
    POPULAR_BOOKMAKERS
        .iter()
        .map(|(key, _)| key.to_string())
        .collect()
}

fn default_sports() -> Vec<String> {
    DEFAULT_SPORTS.iter().map(|s| s.to_string()).collect()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            market: MarketType::default(),
            bankroll: None,
            bookmakers: default_bookmakers(),
            search: None,
            sport: None,
            sports: default_sports(),
        }
    }
}

impl BoardConfig {
    /// Board parameters from configured defaults
    pub fn params(&self) -> BoardParams {
        let params = BoardParams::new(self.market).with_bookmakers(self.bookmakers.iter().cloned());
        match self.bankroll {
            Some(bankroll) => params.with_bankroll(bankroll),
            None => params,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when an optional file is missing
    ///
    /// Returns the config and whether the defaults were used.
    pub fn load_optional(path: impl AsRef<Path>, required: bool) -> anyhow::Result<(Self, bool)> {
        let path = path.as_ref();
        if !required && !path.exists() {
            return Ok((Self::default(), true));
        }
        Ok((Self::load(path)?, false))
    }

    /// Check values that deserialize but cannot be used
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.odds_api.odds_format.eq_ignore_ascii_case("american") {
            anyhow::bail!(
                "Unsupported odds_format '{}': only american odds are supported",
                self.odds_api.odds_format
            );
        }
        if self.odds_api.timeout_secs == 0 {
            anyhow::bail!("odds_api.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

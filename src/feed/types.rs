//! Odds feed types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A sport listed by the odds API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    /// Sport key used in odds requests (e.g. "basketball_nba")
    pub key: String,
    #[serde(default)]
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub active: bool,
}

/// Errors fetching or decoding odds
#[derive(Debug, Error)]
pub enum FeedError {
    /// No API key configured
    #[error("Odds API key not configured (set odds_api.api_key or ODDS_API_KEY)")]
    MissingApiKey,
    /// Non-success HTTP status
    #[error("Odds API error: {status} - {body}")]
    Status { status: u16, body: String },
    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Payload did not match the expected shape
    #[error("Failed to decode odds payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// Local file could not be read
    #[error("Failed to read odds file: {0}")]
    Io(#[from] std::io::Error),
}

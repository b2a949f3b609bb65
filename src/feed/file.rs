//! JSON file odds source

use super::{FeedError, OddsSource};
use crate::odds::{MarketType, Match};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Payload is either a list of matches or a single match
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<Match>),
    One(Box<Match>),
}

/// Parse an odds payload saved from the odds API
pub fn parse_matches(json: &str) -> Result<Vec<Match>, FeedError> {
    let matches = match serde_json::from_str::<Payload>(json) {
        Ok(Payload::Many(matches)) => matches,
        Ok(Payload::One(event)) => vec![*event],
        // Re-parse as a list to surface a useful error position
        Err(_) => serde_json::from_str::<Vec<Match>>(json)?,
    };
    Ok(matches)
}

/// Reads matches from a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OddsSource for JsonFileSource {
    async fn fetch_odds(&self, sport: &str, market: MarketType) -> Result<Vec<Match>, FeedError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let matches = parse_matches(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            sport,
            market = %market,
            matches = matches.len(),
            "Loaded odds file"
        );

        Ok(matches)
    }
}

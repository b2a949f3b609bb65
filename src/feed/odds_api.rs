//! the-odds-api.com v4 client
//!
//! Fetches sports, per-sport odds and single-event odds in American format.
//! Retry and caching are left to the caller.

use super::{FeedError, OddsSource, Sport};
use crate::config::OddsApiConfig;
use crate::odds::{MarketType, Match};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Odds API base URL
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com/v4";

/// Client for the odds API
pub struct OddsApiClient {
    base_url: String,
    api_key: String,
    regions: String,
    client: Client,
}

impl OddsApiClient {
    /// Create a client from configuration
    pub fn new(config: &OddsApiConfig) -> Result<Self, FeedError> {
        let api_key = config.resolved_api_key().ok_or(FeedError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            regions: config.regions.clone(),
            client,
        })
    }

    /// URL of the sports listing
    pub fn sports_url(&self) -> String {
        format!("{}/sports", self.base_url)
    }

    /// URL of the odds listing for a sport
    pub fn odds_url(&self, sport: &str) -> String {
        format!("{}/sports/{}/odds", self.base_url, sport)
    }

    /// URL of the odds for a single event
    pub fn event_odds_url(&self, sport: &str, event_id: &str) -> String {
        format!("{}/sports/{}/events/{}/odds", self.base_url, sport, event_id)
    }

    /// Fetch one event with both moneyline and spread quotes
    pub async fn fetch_event_odds(&self, sport: &str, event_id: &str) -> Result<Match, FeedError> {
        let url = self.event_odds_url(sport, event_id);
        tracing::debug!(url = %url, "Fetching event odds");

        let markets = [MarketType::H2h.key(), MarketType::Spreads.key()].join(",");
        let event: Match = self
            .get_json(
                &url,
                &[
                    ("regions", self.regions.as_str()),
                    ("markets", markets.as_str()),
                    ("oddsFormat", "american"),
                ],
            )
            .await?;

        tracing::info!(sport, event_id, bookmakers = event.bookmakers.len(), "Fetched event odds");
        Ok(event)
    }

    /// Fetch the sports offered by the API
    pub async fn fetch_sports(&self) -> Result<Vec<Sport>, FeedError> {
        let url = self.sports_url();
        tracing::debug!(url = %url, "Fetching sports");

        let sports: Vec<Sport> = self.get_json(&url, &[]).await?;
        tracing::info!(sports = sports.len(), "Fetched sports");
        Ok(sports)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FeedError> {
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, url, "Odds API request failed");
            return Err(FeedError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn fetch_odds(&self, sport: &str, market: MarketType) -> Result<Vec<Match>, FeedError> {
        let url = self.odds_url(sport);
        tracing::debug!(url = %url, market = %market, "Fetching odds");

        let matches: Vec<Match> = self
            .get_json(
                &url,
                &[
                    ("regions", self.regions.as_str()),
                    ("markets", market.key()),
                    ("oddsFormat", "american"),
                ],
            )
            .await?;

        tracing::info!(sport, market = %market, matches = matches.len(), "Fetched odds");
        Ok(matches)
    }
}

//! Odds payload types and price conversion
//!
//! Mirrors the per-match payload served by the odds API: a match carries
//! bookmakers, each bookmaker carries markets, each market carries outcomes
//! priced in American odds.

mod convert;
mod types;

pub use convert::{
    american_from_f64, american_to_decimal, american_to_implied_probability, decimal_from_f64,
    decimal_to_american, decimal_to_implied_probability,
};
pub use types::{MarketError, OddsError, ParseMarketTypeError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market type supported by the odds board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Moneyline (head to head)
    #[default]
    H2h,
    /// Point spread
    Spreads,
}

impl MarketType {
    /// Market key as used by the odds API
    pub fn key(&self) -> &'static str {
        match self {
            MarketType::H2h => "h2h",
            MarketType::Spreads => "spreads",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            MarketType::H2h => "Moneyline",
            MarketType::Spreads => "Spread",
        }
    }

    /// Whether outcomes in this market carry a line
    pub fn has_point(&self) -> bool {
        matches!(self, MarketType::Spreads)
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MarketType {
    type Err = ParseMarketTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h2h" | "moneyline" => Ok(MarketType::H2h),
            "spreads" | "spread" => Ok(MarketType::Spreads),
            other => Err(ParseMarketTypeError(other.to_string())),
        }
    }
}

/// Which side of a two-outcome match a team plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A single priced outcome
///
/// The price is kept as received and validated when used, so a null or
/// malformed price only affects this outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Team name
    pub name: String,
    /// American odds as quoted; `None` when missing or not a number
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// Spread or total line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Decimal>,
}

impl Outcome {
    /// Outcome quoted at a whole American price
    pub fn new(name: impl Into<String>, american: i64) -> Self {
        Self {
            name: name.into(),
            price: Some(american as f64),
            point: None,
        }
    }

    /// Attach a spread line
    pub fn with_point(mut self, point: Decimal) -> Self {
        self.point = Some(point);
        self
    }

    /// Validated American price
    pub fn american(&self) -> Result<i64, OddsError> {
        let price = self.price.ok_or(OddsError::MissingPrice)?;
        american_from_f64(price)
    }
}

/// Accept numbers and numeric strings; anything else becomes `None`
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// A bookmaker's market (e.g. "h2h") with its outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Market {
    /// Find the outcome priced for a team
    pub fn outcome(&self, team: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.name == team)
    }
}

/// Quotes from a single bookmaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerQuote {
    /// Bookmaker identifier (e.g. "draftkings")
    pub key: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

impl BookmakerQuote {
    /// Look up a market by type
    pub fn market(&self, market: MarketType) -> Option<&Market> {
        self.markets.iter().find(|m| m.key == market.key())
    }

    /// Outcome for a team in the given market
    pub fn outcome(&self, market: MarketType, team: &str) -> Result<&Outcome, MarketError> {
        let m = self.market(market).ok_or_else(|| MarketError::MissingMarket {
            bookmaker: self.key.clone(),
            market: market.key().to_string(),
        })?;

        m.outcome(team).ok_or_else(|| MarketError::MissingOutcome {
            bookmaker: self.key.clone(),
            team: team.to_string(),
        })
    }

    /// Validated American price for a team in the given market
    pub fn price(&self, market: MarketType, team: &str) -> Result<i64, MarketError> {
        self.outcome(market, team)?
            .american()
            .map_err(|source| MarketError::InvalidQuote {
                bookmaker: self.key.clone(),
                source,
            })
    }
}

/// A two-sided sporting event with bookmaker quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerQuote>,
}

impl Match {
    /// Team name for a side
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Look up a bookmaker by key
    pub fn bookmaker(&self, key: &str) -> Option<&BookmakerQuote> {
        self.bookmakers.iter().find(|b| b.key == key)
    }

    /// Case-insensitive team name search
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.home_team.to_lowercase().contains(&query)
            || self.away_team.to_lowercase().contains(&query)
    }
}

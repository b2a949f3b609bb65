//! Odds feed module
//!
//! Loads match payloads from the odds API or from a local JSON file. The
//! calculation engine never performs I/O; everything it sees arrives through
//! an [`OddsSource`].

mod file;
mod odds_api;
mod types;

pub use file::{parse_matches, JsonFileSource};
pub use odds_api::{OddsApiClient, ODDS_API_URL};
pub use types::{FeedError, Sport};

use crate::odds::{MarketType, Match};
use async_trait::async_trait;
use futures_util::future::join_all;

/// Sports fetched when none is selected
pub const DEFAULT_SPORTS: &[&str] = &[
    "americanfootball_nfl",
    "americanfootball_ncaaf",
    "basketball_nba",
    "baseball_mlb",
    "mma_mixed_martial_arts",
    "icehockey_nhl",
    "tennis_atp_french_open",
    "soccer_usa_mls",
    "soccer_brazil_campeonato",
    "soccer_spain_segunda_division",
    "soccer_uefa_european_championship",
    "soccer_australia_aleague",
    "soccer_japan_j_league",
];

/// Trait for odds payload sources
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Fetch upcoming matches for a sport with quotes for one market
    async fn fetch_odds(&self, sport: &str, market: MarketType) -> Result<Vec<Match>, FeedError>;
}

/// Fetch several sports concurrently and merge the matches
///
/// Matches without a sport key are tagged with the sport they were fetched
/// for. A failing sport is logged and skipped; the call only fails when
/// every sport fails.
pub async fn fetch_all<S>(
    source: &S,
    sports: &[String],
    market: MarketType,
) -> Result<Vec<Match>, FeedError>
where
    S: OddsSource + ?Sized,
{
    let results = join_all(sports.iter().map(|sport| async move {
        (sport, source.fetch_odds(sport, market).await)
    }))
    .await;

    let mut matches = Vec::new();
    let mut succeeded = 0;
    let mut last_error = None;
    for (sport, result) in results {
        match result {
            Ok(batch) => {
                succeeded += 1;
                matches.extend(batch.into_iter().map(|mut m| {
                    m.sport_key.get_or_insert_with(|| sport.clone());
                    m
                }));
            }
            Err(e) => {
                tracing::warn!(sport = %sport, error = %e, "Skipping sport after fetch failure");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if succeeded == 0 => Err(e),
        _ => {
            tracing::info!(sports = succeeded, matches = matches.len(), "Fetched odds across sports");
            Ok(matches)
        }
    }
}

//! Vig-free consensus across bookmakers
//!
//! Each qualifying bookmaker's two implied probabilities are normalized so the
//! pair sums to 1 (removing the overround), then each side is averaged across
//! bookmakers with equal weight. The averaged pair is reported as is.

use super::{ConsensusProbability, ProbabilityModel};
use crate::odds::{
    american_to_decimal, decimal_to_implied_probability, BookmakerQuote, Match, MarketError,
    MarketType,
};
use crate::telemetry::{increment, CounterMetric};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Equal-weight consensus of vig-free bookmaker probabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusModel;

impl ConsensusModel {
    /// Create a new consensus model
    pub fn new() -> Self {
        Self
    }
}

impl ProbabilityModel for ConsensusModel {
    fn estimate(
        &self,
        event: &Match,
        market: MarketType,
        selected: &HashSet<String>,
    ) -> ConsensusProbability {
        let mut home_probs = Vec::new();
        let mut away_probs = Vec::new();

        for bookmaker in event.bookmakers.iter().filter(|b| selected.contains(&b.key)) {
            match vig_free_split(bookmaker, market, &event.home_team, &event.away_team) {
                Ok((home, away)) => {
                    home_probs.push(home);
                    away_probs.push(away);
                }
                Err(e) => {
                    increment(CounterMetric::QuotesExcluded);
                    tracing::debug!(
                        match_id = %event.id,
                        bookmaker = %bookmaker.key,
                        error = %e,
                        "Bookmaker excluded from consensus"
                    );
                }
            }
        }

        ConsensusProbability {
            home_prob: mean(&home_probs),
            away_prob: mean(&away_probs),
            bookmakers_used: home_probs.len(),
        }
    }
}

/// One bookmaker's vig-free (home, away) probability pair
///
/// The bookmaker must price both teams in the market with valid odds;
/// otherwise it contributes nothing for either side.
pub fn vig_free_split(
    bookmaker: &BookmakerQuote,
    market: MarketType,
    home_team: &str,
    away_team: &str,
) -> Result<(Decimal, Decimal), MarketError> {
    let home_raw = implied(bookmaker, market, home_team)?;
    let away_raw = implied(bookmaker, market, away_team)?;

    normalize_pair(home_raw, away_raw).ok_or_else(|| MarketError::MissingOutcome {
        bookmaker: bookmaker.key.clone(),
        team: home_team.to_string(),
    })
}

/// Scale a pair of raw implied probabilities so they sum to exactly 1
///
/// Returns `None` when the pair carries no probability mass.
pub fn normalize_pair(home_raw: Decimal, away_raw: Decimal) -> Option<(Decimal, Decimal)> {
    let total = home_raw + away_raw;
    if total <= Decimal::ZERO {
        return None;
    }

    let home = home_raw / total;
    Some((home, Decimal::ONE - home))
}

fn implied(bookmaker: &BookmakerQuote, market: MarketType, team: &str) -> Result<Decimal, MarketError> {
    let american = bookmaker.price(market, team)?;
    american_to_decimal(american)
        .and_then(decimal_to_implied_probability)
        .map_err(|source| MarketError::InvalidQuote {
            bookmaker: bookmaker.key.clone(),
            source,
        })
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

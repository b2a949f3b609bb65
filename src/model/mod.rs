//! Probability model module
//!
//! Estimates the "true" win probability of each side of a two-outcome match
//! from the quotes of the selected bookmakers.

mod consensus;

pub use consensus::{normalize_pair, vig_free_split, ConsensusModel};

use crate::odds::{Match, MarketType, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Estimated probability for both sides of a match
///
/// Recomputed from scratch for every set of inputs; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusProbability {
    /// Estimated probability the home team wins
    pub home_prob: Decimal,
    /// Estimated probability the away team wins
    pub away_prob: Decimal,
    /// Number of bookmakers that priced both sides
    pub bookmakers_used: usize,
}

impl ConsensusProbability {
    /// Probability for one side
    pub fn for_side(&self, side: Side) -> Decimal {
        match side {
            Side::Home => self.home_prob,
            Side::Away => self.away_prob,
        }
    }

    /// True when no bookmaker contributed
    pub fn is_empty(&self) -> bool {
        self.bookmakers_used == 0
    }
}

/// Trait for probability model implementations
pub trait ProbabilityModel: Send + Sync {
    /// Estimate per-side probabilities for a match and market
    fn estimate(
        &self,
        event: &Match,
        market: MarketType,
        selected: &HashSet<String>,
    ) -> ConsensusProbability;
}

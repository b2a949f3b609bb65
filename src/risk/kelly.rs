//! Kelly criterion stake sizing
//!
//! For decimal odds `d` and estimated win probability `p`:
//! - Net odds: b = d - 1
//! - Kelly fraction: f* = (b*p - q) / b, with q = 1 - p
//!
//! The fraction is floored at 0 (no edge, no bet) and capped at 25% of the
//! bankroll.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Hard cap on the fraction of bankroll staked on one bet
pub const MAX_KELLY_FRACTION: Decimal = dec!(0.25);

/// Decimal places kept from the raw Kelly value.
/// Division residue below this scale would otherwise turn a zero edge into
/// a tiny non-zero stake.
const KELLY_SCALE: u32 = 16;

/// Stake sizing for one bookmaker cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KellyResult {
    /// Fraction of bankroll to stake, in [0, 0.25]
    pub kelly_fraction: Decimal,
    /// Stake in bankroll currency
    pub recommended_bet: Decimal,
}

/// Capped Kelly calculator
#[derive(Debug, Clone, Copy)]
pub struct KellySizer {
    max_fraction: Decimal,
}

impl KellySizer {
    /// Create a sizer with the standard 25% cap
    pub fn new() -> Self {
        Self {
            max_fraction: MAX_KELLY_FRACTION,
        }
    }

    /// Upper bound on the returned fraction
    pub fn max_fraction(&self) -> Decimal {
        self.max_fraction
    }

    /// Kelly fraction for a decimal price and estimated probability
    pub fn kelly_fraction(&self, decimal_odds: Decimal, estimated_probability: Decimal) -> Decimal {
        let b = decimal_odds - Decimal::ONE;
        if b <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let q = Decimal::ONE - estimated_probability;
        let raw = ((b * estimated_probability - q) / b).round_dp(KELLY_SCALE);

        raw.max(Decimal::ZERO).min(self.max_fraction)
    }

    /// Stake for a Kelly fraction. A zero or negative bankroll stakes nothing.
    pub fn recommended_bet(&self, kelly_fraction: Decimal, bankroll: Decimal) -> Decimal {
        if bankroll <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        kelly_fraction * bankroll
    }

    /// Fraction and stake in one step; `None` bankroll means sizing is off
    pub fn size(
        &self,
        decimal_odds: Decimal,
        estimated_probability: Decimal,
        bankroll: Option<Decimal>,
    ) -> KellyResult {
        let kelly_fraction = self.kelly_fraction(decimal_odds, estimated_probability);
        let recommended_bet = bankroll
            .map(|b| self.recommended_bet(kelly_fraction, b))
            .unwrap_or(Decimal::ZERO);

        KellyResult {
            kelly_fraction,
            recommended_bet,
        }
    }
}

impl Default for KellySizer {
    fn default() -> Self {
        Self::new()
    }
}

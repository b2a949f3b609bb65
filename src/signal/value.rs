//! Value bet classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Comparison of estimated and bookmaker-implied probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAssessment {
    /// Estimated minus implied probability
    pub prob_difference: Decimal,
    /// Estimated probability strictly exceeds the implied one
    pub is_value_bet: bool,
}

impl ValueAssessment {
    /// A cell is actionable only when the value signal and a positive Kelly
    /// stake agree.
    pub fn is_actionable(&self, kelly_fraction: Decimal) -> bool {
        self.is_value_bet && kelly_fraction > Decimal::ZERO
    }
}

/// Flags bets whose price implies less than the estimated probability
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueBetClassifier;

impl ValueBetClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Compare an estimated probability with a bookmaker's implied one
    pub fn classify(
        &self,
        estimated_probability: Decimal,
        implied_probability: Decimal,
    ) -> ValueAssessment {
        let prob_difference = estimated_probability - implied_probability;
        ValueAssessment {
            prob_difference,
            is_value_bet: prob_difference > Decimal::ZERO,
        }
    }
}

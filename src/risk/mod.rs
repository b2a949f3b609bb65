//! Risk management module
//!
//! Stake sizing for value bets

mod kelly;

pub use kelly::{KellyResult, KellySizer, MAX_KELLY_FRACTION};

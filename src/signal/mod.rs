//! Signal generation module
//!
//! Detects value bets in bookmaker prices

mod value;

pub use value::{ValueAssessment, ValueBetClassifier};

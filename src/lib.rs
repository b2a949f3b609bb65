//! oddsboard: sportsbook odds comparison and bet sizing
//!
//! This library provides the core components for:
//! - American/decimal odds conversion and implied probability
//! - Vig-free consensus probability across bookmakers
//! - Capped Kelly criterion stake sizing
//! - Value bet classification
//! - Odds board assembly and rendering
//! - Odds API and JSON file feeds

pub mod board;
pub mod cli;
pub mod config;
pub mod feed;
pub mod model;
pub mod odds;
pub mod risk;
pub mod signal;
pub mod telemetry;

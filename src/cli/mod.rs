//! CLI interface for oddsboard
//!
//! Provides subcommands for:
//! - `analyze`: Compute the odds board from a saved JSON payload
//! - `fetch`: Fetch odds from the odds API and compute the board
//! - `sports`: List sports offered by the odds API
//! - `config`: Show the effective configuration

mod analyze;
mod board_args;
mod fetch;
mod sports;

pub use analyze::AnalyzeArgs;
pub use board_args::{BoardArgs, OutputFormat};
pub use fetch::{FetchArgs, FetchPlan};
pub use sports::SportsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "oddsboard")]
#[command(about = "Sportsbook odds comparison with consensus probability and Kelly sizing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "oddsboard.toml")]
    pub config: String,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the odds board from a JSON file
    Analyze(AnalyzeArgs),
    /// Fetch odds from the API and compute the board
    Fetch(FetchArgs),
    /// List sports offered by the odds API
    Sports(SportsArgs),
    /// Show configuration
    Config,
}

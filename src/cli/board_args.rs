//! Board options shared by the analyze and fetch commands

use crate::board::{filter_matches, render_table, BoardBuilder, BoardParams};
use crate::config::BoardConfig;
use crate::odds::{MarketType, Match};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

/// Output format for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Market to compare: h2h or spreads
    #[arg(long)]
    pub market: Option<MarketType>,

    /// Bankroll for Kelly stake sizing
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Comma-separated bookmaker keys to include
    #[arg(long, value_delimiter = ',')]
    pub bookmakers: Option<Vec<String>>,

    /// Case-insensitive team name search
    #[arg(long)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl BoardArgs {
    /// Market after applying config defaults
    pub fn market(&self, config: &BoardConfig) -> MarketType {
        self.market.unwrap_or(config.market)
    }

    /// Board parameters with CLI flags overriding config defaults
    pub fn params(&self, config: &BoardConfig) -> BoardParams {
        let mut params = config.params();
        params.market = self.market(config);
        if let Some(bookmakers) = &self.bookmakers {
            params = params.with_bookmakers(bookmakers.iter().map(|b| b.trim().to_string()));
        }
        if let Some(bankroll) = self.bankroll {
            params = params.with_bankroll(bankroll);
        }
        params
    }

    /// Filter, compute and format the board
    ///
    /// `sport` narrows the matches when no search is given; pass `None` when
    /// the matches were already fetched for a single sport.
    pub fn render(
        &self,
        matches: &[Match],
        config: &BoardConfig,
        sport: Option<&str>,
    ) -> anyhow::Result<String> {
        let params = self.params(config);
        let search = self.search.as_deref().or(config.search.as_deref());
        let selected = filter_matches(matches, search, sport);

        let board = BoardBuilder::new().build(selected, &params);
        match self.format {
            OutputFormat::Table => Ok(render_table(&board)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&board)?),
        }
    }
}

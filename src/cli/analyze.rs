//! Analyze command implementation

use super::BoardArgs;
use crate::config::Config;
use crate::feed::{JsonFileSource, OddsSource};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file with one match or a list of matches
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub board: BoardArgs,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let market = self.board.market(&config.board);
        let source = JsonFileSource::new(&self.input);
        let matches = source.fetch_odds("file", market).await?;

        tracing::info!(input = ?self.input, matches = matches.len(), "Analyzing odds file");

        let sport = config.board.sport.as_deref();
        println!("{}", self.board.render(&matches, &config.board, sport)?);
        Ok(())
    }
}

//! Fetch command implementation

use super::BoardArgs;
use crate::config::{BoardConfig, Config};
use crate::feed::{fetch_all, OddsApiClient, OddsSource};
use clap::Args;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Sport key (e.g. basketball_nba); defaults to the configured sport,
    /// otherwise every configured sport is fetched
    #[arg(long)]
    pub sport: Option<String>,

    /// Single event id; fetches moneyline and spread quotes for that match
    #[arg(long)]
    pub event: Option<String>,

    #[command(flatten)]
    pub board: BoardArgs,
}

/// What a fetch run requests from the odds API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    Event { sport: String, event_id: String },
    Sport(String),
    AllSports(Vec<String>),
}

impl FetchArgs {
    /// Resolve flags against configured defaults
    pub fn plan(&self, config: &BoardConfig) -> anyhow::Result<FetchPlan> {
        let sport = self.sport.clone().or_else(|| config.sport.clone());
        match (&self.event, sport) {
            (Some(event_id), Some(sport)) => Ok(FetchPlan::Event {
                sport,
                event_id: event_id.clone(),
            }),
            (Some(_), None) => anyhow::bail!("--event needs a sport (--sport or board.sport)"),
            (None, Some(sport)) => Ok(FetchPlan::Sport(sport)),
            (None, None) => Ok(FetchPlan::AllSports(config.sports.clone())),
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let market = self.board.market(&config.board);
        let client = OddsApiClient::new(&config.odds_api)?;

        let matches = match self.plan(&config.board)? {
            FetchPlan::Event { sport, event_id } => {
                vec![client.fetch_event_odds(&sport, &event_id).await?]
            }
            FetchPlan::Sport(sport) => client.fetch_odds(&sport, market).await?,
            FetchPlan::AllSports(sports) => fetch_all(&client, &sports, market).await?,
        };

        // Requests are already scoped to the chosen sport
        println!("{}", self.board.render(&matches, &config.board, None)?);
        Ok(())
    }
}

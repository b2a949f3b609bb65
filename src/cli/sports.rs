//! Sports command implementation

use crate::config::Config;
use crate::feed::OddsApiClient;
use clap::Args;

#[derive(Args, Debug)]
pub struct SportsArgs {
    /// Include inactive sports
    #[arg(long)]
    pub all: bool,
}

impl SportsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = OddsApiClient::new(&config.odds_api)?;
        let sports = client.fetch_sports().await?;

        for sport in sports.iter().filter(|s| self.all || s.active) {
            println!("{:<40} {:<20} {}", sport.key, sport.group, sport.title);
        }
        Ok(())
    }
}

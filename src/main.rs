use clap::Parser;
use oddsboard::cli::{Cli, Commands};
use oddsboard::config::Config;

const DEFAULT_CONFIG_PATH: &str = "oddsboard.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing default config is fine; an explicit path must load
    let required = cli.config != DEFAULT_CONFIG_PATH;
    let (mut config, defaulted) = Config::load_optional(&cli.config, required)
        .map_err(|e| anyhow::anyhow!("Could not load config from {}: {}", cli.config, e))?;

    if let Some(level) = &cli.log_level {
        config.telemetry.log_level = level.clone();
    }

    oddsboard::telemetry::init_telemetry(&config.telemetry)?;

    if defaulted {
        tracing::warn!(path = %cli.config, "Config file not found, using default configuration");
    }

    match cli.command {
        Commands::Analyze(args) => args.execute(&config).await?,
        Commands::Fetch(args) => args.execute(&config).await?,
        Commands::Sports(args) => args.execute(&config).await?,
        Commands::Config => {
            println!("Current configuration:");
            println!("  Odds API: {}", config.odds_api.base_url);
            println!("  Regions: {}", config.odds_api.regions);
            println!(
                "  API key: {}",
                if config.odds_api.resolved_api_key().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!(
                "  Market: {} ({})",
                config.board.market.label(),
                config.board.market
            );
            match config.board.bankroll {
                Some(bankroll) => println!("  Bankroll: {}", bankroll),
                None => println!("  Bankroll: not set (no stake sizing)"),
            }
            println!("  Bookmakers: {}", config.board.bookmakers.join(", "));
            match &config.board.sport {
                Some(sport) => println!("  Sport: {}", sport),
                None => println!("  Sports: {}", config.board.sports.join(", ")),
            }
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}

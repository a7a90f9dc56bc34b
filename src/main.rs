use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swisspair::config::AppConfig;
use swisspair::models::PlayerId;
use swisspair::store::{JsonlStore, StoreConfig};
use swisspair::tournament::Tournament;

#[derive(Parser)]
#[command(name = "swisspair")]
#[command(about = "Swiss-system tournament standings and pairings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new player
    Register {
        /// Player's display name
        name: String,
    },

    /// Report a match outcome
    Report {
        /// Winner's player id
        winner: u64,

        /// Loser's player id
        loser: u64,
    },

    /// Show the current standings
    Standings,

    /// Generate pairings for the next round
    Pair,

    /// Count registered players
    Count,

    /// Delete all match records
    ResetMatches,

    /// Delete all matches and all players
    ResetAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config file is optional; fall back to defaults when absent
    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());

    let store = JsonlStore::new(StoreConfig::new(data_dir));
    let tournament = Tournament::new(store)
        .with_bye_policy(config.pairing.bye_policy)
        .with_op_timeout(Duration::from_secs(config.op_timeout_seconds));

    match cli.command {
        Commands::Register { name } => {
            let id = tournament.register_player(&name).await?;
            println!("Registered {} with id {}", name, id);
        }
        Commands::Report { winner, loser } => {
            tournament
                .report_match(PlayerId::new(winner), PlayerId::new(loser))
                .await?;
            println!("Recorded: {} beat {}", winner, loser);
        }
        Commands::Standings => {
            let standings = tournament.standings().await?;
            if standings.is_empty() {
                println!("No players registered.");
            } else {
                println!("{:>4}  {:<24} {:>5} {:>8}", "id", "name", "wins", "matches");
                for s in &standings {
                    println!(
                        "{:>4}  {:<24} {:>5} {:>8}",
                        s.id, s.name, s.wins, s.matches_played
                    );
                }
            }
        }
        Commands::Pair => {
            let round = tournament.swiss_pairings().await?;
            if round.pairs.is_empty() && round.bye.is_none() {
                println!("No players to pair.");
            } else {
                for (i, p) in round.pairs.iter().enumerate() {
                    println!(
                        "Table {}: {} ({}) vs {} ({})",
                        i + 1,
                        p.player1_name,
                        p.player1_id,
                        p.player2_name,
                        p.player2_id
                    );
                }
                if let Some(bye) = &round.bye {
                    println!("Bye: {} ({})", bye.player_name, bye.player_id);
                }
            }
        }
        Commands::Count => {
            println!("{}", tournament.count_players().await?);
        }
        Commands::ResetMatches => {
            tournament.reset_matches().await?;
            println!("All match records deleted.");
        }
        Commands::ResetAll { yes } => {
            if !yes {
                eprintln!("This deletes every player and match. Re-run with --yes to confirm.");
                std::process::exit(1);
            }
            tournament.reset_all().await?;
            println!("Tournament reset: all players and matches deleted.");
        }
    }

    Ok(())
}

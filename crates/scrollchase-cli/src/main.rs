use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollchase_core::{AppConfig, Point};

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "scrollchase")]
#[command(author, version, about = "Simulate target-chasing scroll animations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/scrollchase/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scroll cycle against a virtual surface
    Simulate(commands::simulate::SimulateArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse an `x,y` offset argument
pub(crate) fn parse_point(s: &str) -> std::result::Result<Point, String> {
    s.parse::<Point>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&config, args).await,
        Commands::Config { action } => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            match action {
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Path => commands::config::path(&path),
                ConfigAction::Init { force } => commands::config::init(&path, force),
            }
        }
    }
}

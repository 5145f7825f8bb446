use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "availgrid-cli", version, about = "Availgrid CLI")]
struct Cli {
    /// Use this config file instead of ~/.config/availgrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the group heatmap of a vote file
    Heatmap(commands::heatmap::HeatmapArgs),
    /// Build the submission payload of a selection file
    Payload(commands::payload::PayloadArgs),
    /// Compute grid geometry for a viewport
    Geometry(commands::geometry::GeometryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Submit a selection file to the vote API
    Submit(commands::submit::SubmitArgs),
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("AVAILGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Heatmap(args) => commands::heatmap::run(args, config),
        Commands::Payload(args) => commands::payload::run(args),
        Commands::Geometry(args) => commands::geometry::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Submit(args) => commands::submit::run(args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use p2feature_lib::consts::CONFIG_FILENAME;

/// p2feature - Eclipse p2 feature artifact generator
#[derive(Parser)]
#[command(name = "p2feature")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate feature.xml, p2.inf, feature.properties and MANIFEST.MF
  Generate {
    /// Path to the project file
    #[arg(default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Output directory (overrides the project file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show what generate would add, without writing anything
  Plan {
    /// Path to the project file
    #[arg(default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Output the plan as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Generate { config, output, json } => cmd::cmd_generate(&config, output, cli.verbose, json),
    Commands::Plan { config, json } => cmd::cmd_plan(&config, cli.verbose, json),
  }
}

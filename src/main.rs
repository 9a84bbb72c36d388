//! ttyplay command-line entry point.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ttyplay::Config;

/// Environment variable holding the log filter (e.g. `debug`, `ttyplay=trace`).
const LOG_ENV: &str = "TTYPLAY_LOG";

#[derive(Parser)]
#[command(name = "ttyplay", version, about = "Replay ttyrec terminal recordings")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recording to the terminal (Ctrl-C stops)
    Play {
        /// Recording to play (.ttyrec, optionally gzipped)
        file: PathBuf,

        /// Speed multiplier (2 plays twice as fast)
        #[arg(short, long)]
        speed: Option<f64>,

        /// Cap on any single pause between frames, in milliseconds
        #[arg(long = "max-delay", value_name = "MS")]
        max_delay: Option<u64>,
    },

    /// Show a summary of a recording
    Info {
        /// Recording to inspect
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the default config file location
    Path,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("Failed to load configuration")
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            file,
            speed,
            max_delay,
        } => {
            let config = load_config(cli.config.as_deref())?;
            commands::play::handle(&file, config.playback, speed, max_delay)
        }
        Commands::Info { file, json } => commands::info::handle(&file, json),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(cli.config.as_deref()),
            ConfigCommands::Path => commands::config::handle_path(),
        },
    }
}

//! AreaMap CLI - Command-line interface
//!
//! Renders and caches area maps cropped from a reference raster.

mod commands;
mod error;

use std::path::PathBuf;

use areamap::config::{config_directory, config_file_path, Settings};
use areamap::logging::{init_logging, DEFAULT_LOG_FILE};
use clap::{Parser, Subcommand};

use commands::cache::CacheAction;
use commands::poll::PollArgs;
use commands::project::ProjectArgs;
use commands::render::RenderArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "areamap")]
#[command(version, about = "Cropped area maps from a reference raster, cached per area", long_about = None)]
struct Cli {
    /// Settings file (default: ~/.areamap/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the tile for an area config file
    Render(RenderArgs),

    /// Consume a config drop from the dump directory and render its tile
    Poll(PollArgs),

    /// Show the crop rectangle for an area config file
    Project(ProjectArgs),

    /// Manage the tile cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Create the settings file with defaults
    Init,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.unwrap_or_else(config_file_path);

    if let Commands::Init = cli.command {
        return commands::init::run(&config_path);
    }

    let settings = Settings::load_from(&config_path)?;

    let level = if cli.verbose { "debug" } else { "info" };
    let log_dir = config_path
        .parent()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| config_directory().join("logs"));
    let _logging_guard = init_logging(&log_dir, DEFAULT_LOG_FILE, level)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    match cli.command {
        Commands::Render(args) => commands::render::run(&settings, args),
        Commands::Poll(args) => commands::poll::run(&settings, args),
        Commands::Project(args) => commands::project::run(&settings, args),
        Commands::Cache { action } => commands::cache::run(&settings, action),
        Commands::Init => commands::init::run(&config_path),
    }
}

//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use areamap::cache::TileCacheError;
use areamap::config::ConfigFileError;
use areamap::ingest::IngestError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Settings file could not be loaded or written
    Config(ConfigFileError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write a tile to the requested output
    TileWrite {
        path: String,
        error: image::ImageError,
    },
    /// Area config text could not be ingested
    Ingest(IngestError),
    /// Tile could not be resolved
    Tile(TileCacheError),
    /// Failed to clear the tile cache
    CacheClear(String),
    /// Failed to read tile cache statistics
    CacheStats(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Tile(TileCacheError::ReferenceRasterUnavailable { .. }) => {
                eprintln!();
                eprintln!("Set the reference raster location in the config file:");
                eprintln!("  [paths]");
                eprintln!("  reference_raster = /path/to/reference.png");
            }
            CliError::Tile(TileCacheError::DegenerateCrop(_)) => {
                eprintln!();
                eprintln!("The first corner must be the north-west (top-left) corner,");
                eprintln!("the second the south-east (bottom-right) corner.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::TileWrite { path, error } => {
                write!(f, "Failed to write tile to '{}': {}", path, error)
            }
            CliError::Ingest(e) => write!(f, "Invalid area config: {}", e),
            CliError::Tile(TileCacheError::Ingest(e)) => write!(f, "Invalid area config: {}", e),
            CliError::Tile(e) => write!(f, "{}", e),
            CliError::CacheClear(msg) => write!(f, "Failed to clear cache: {}", msg),
            CliError::CacheStats(msg) => write!(f, "Failed to read cache statistics: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::TileWrite { error, .. } => Some(error),
            CliError::Ingest(e) => Some(e),
            CliError::Tile(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<IngestError> for CliError {
    fn from(e: IngestError) -> Self {
        CliError::Ingest(e)
    }
}

impl From<TileCacheError> for CliError {
    fn from(e: TileCacheError) -> Self {
        CliError::Tile(e)
    }
}

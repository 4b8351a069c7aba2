//! Cache management CLI commands.

use std::path::Path;

use areamap::cache::{clear_tile_cache, tile_cache_stats, ClearResult};
use areamap::config::Settings;
use clap::Subcommand;

use super::common::format_size;
use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Delete every cached area map (map_*.png)
    Clear,
    /// Count cached area maps and their size on disk
    Stats,
}

/// Run a cache subcommand.
pub fn run(settings: &Settings, action: CacheAction) -> Result<(), CliError> {
    let cache_dir = settings.cache_directory();
    println!("Tile cache: {}", cache_dir.display());

    let summary = match action {
        CacheAction::Clear => clear_summary(&clear(cache_dir)?),
        CacheAction::Stats => stats_summary(&stats(cache_dir)?),
    };
    println!("{}", summary);
    Ok(())
}

fn clear(cache_dir: &Path) -> Result<ClearResult, CliError> {
    clear_tile_cache(cache_dir).map_err(|e| CliError::CacheClear(e.to_string()))
}

/// Current entries, reported in the same shape as a clear would free them.
fn stats(cache_dir: &Path) -> Result<ClearResult, CliError> {
    let (files_deleted, bytes_freed) =
        tile_cache_stats(cache_dir).map_err(|e| CliError::CacheStats(e.to_string()))?;
    Ok(ClearResult {
        files_deleted,
        bytes_freed,
    })
}

fn clear_summary(result: &ClearResult) -> String {
    match result.files_deleted {
        0 => "Nothing to clear".to_string(),
        n => format!(
            "Removed {} area map{}, freed {}",
            n,
            plural(n),
            format_size(result.bytes_freed)
        ),
    }
}

fn stats_summary(entries: &ClearResult) -> String {
    let n = entries.files_deleted;
    format!(
        "{} area map{}, {}",
        n,
        plural(n),
        format_size(entries.bytes_freed)
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

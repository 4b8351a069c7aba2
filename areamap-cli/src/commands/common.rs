//! Helpers shared across CLI commands.

use std::fs;
use std::path::Path;

use areamap::cache::AreaTileCache;
use areamap::config::Settings;

use crate::error::CliError;

/// Build the tile cache described by `settings`.
pub fn open_cache(settings: &Settings) -> AreaTileCache {
    AreaTileCache::new(settings.tile_cache_config(), settings.raster_source())
}

/// Read an area config file.
pub fn read_area_config(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.display().to_string(),
        error,
    })
}

/// Get the current tile and print a summary, optionally copying it.
pub fn report_tile(cache: &mut AreaTileCache, output: Option<&Path>) -> Result<(), CliError> {
    let cache_file = cache.cache_file();
    let tile = cache.get_tile()?;

    println!("Area:       {}", tile.area_id());
    println!("Size:       {}×{}", tile.width(), tile.height());
    if let Some(path) = cache_file {
        println!("Cache file: {}", path.display());
    }

    if let Some(output) = output {
        tile.image()
            .save(output)
            .map_err(|error| CliError::TileWrite {
                path: output.display().to_string(),
                error,
            })?;
        println!("Written:    {}", output.display());
    }
    Ok(())
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

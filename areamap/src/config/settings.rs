//! Settings structs and their defaults.

use std::path::{Path, PathBuf};

use crate::cache::{TileCacheConfig, DEFAULT_TILE_SIZE};
use crate::dump::{DropDirectory, DEFAULT_DROP_PATTERN};
use crate::raster::{FileRaster, MemoizedRaster, RasterSource};

/// Name of the settings directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".areamap";

/// Name of the settings file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Complete settings, as stored in `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `[paths]` section.
    pub paths: PathSettings,
    /// `[drops]` section.
    pub drops: DropSettings,
    /// `[tile]` section.
    pub tile: TileSettings,
}

/// File system locations.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSettings {
    /// Directory holding `map_<area_id>.png` entries.
    pub cache_directory: PathBuf,
    /// The reference raster every tile is cropped from.
    pub reference_raster: PathBuf,
    /// Directory receiving config drops.
    pub dump_directory: PathBuf,
}

/// Config drop discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct DropSettings {
    /// Glob pattern for drop file names.
    pub pattern: String,
}

/// Produced tile shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSettings {
    /// Tile width in pixels.
    pub width: u32,
    /// Tile height in pixels.
    pub height: u32,
    /// Keep the reference raster in memory between renders.
    pub memoize_reference: bool,
}

/// Get the settings directory (`~/.areamap`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the settings file path (`~/.areamap/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

impl Default for PathSettings {
    fn default() -> Self {
        let base = config_directory();
        Self {
            cache_directory: base.join("cache"),
            reference_raster: base.join("reference.png"),
            dump_directory: base.join("dump"),
        }
    }
}

impl Default for DropSettings {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DROP_PATTERN.to_string(),
        }
    }
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILE_SIZE,
            height: DEFAULT_TILE_SIZE,
            memoize_reference: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            drops: DropSettings::default(),
            tile: TileSettings::default(),
        }
    }
}

impl Settings {
    /// Tile cache configuration derived from these settings.
    pub fn tile_cache_config(&self) -> TileCacheConfig {
        TileCacheConfig::new(&self.paths.cache_directory)
            .with_tile_size(self.tile.width, self.tile.height)
    }

    /// Drop directory derived from these settings.
    pub fn drop_directory(&self) -> DropDirectory {
        DropDirectory::new(&self.paths.dump_directory).with_pattern(&self.drops.pattern)
    }

    /// Reference raster source derived from these settings.
    pub fn raster_source(&self) -> Box<dyn RasterSource> {
        let raster = FileRaster::new(&self.paths.reference_raster);
        if self.tile.memoize_reference {
            Box::new(MemoizedRaster::new(raster))
        } else {
            Box::new(raster)
        }
    }

    /// The cache directory.
    pub fn cache_directory(&self) -> &Path {
        &self.paths.cache_directory
    }
}

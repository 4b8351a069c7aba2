//! The area tile cache.
//!
//! Serves the tile for the currently configured area through three tiers:
//!
//! 1. the in-memory slot
//! 2. the on-disk entry named after the area id
//! 3. rendering from the reference raster
//!
//! Whichever tier answers, a tile that was not already in memory is stored
//! through [`AreaTileCache::store_tile`], so memory and disk always agree.

use std::path::PathBuf;

use image::RgbaImage;
use tracing::{debug, info};

use super::store::TileStore;
use super::tile::Tile;
use super::TileCacheError;
use crate::dump::DropDirectory;
use crate::ingest::AreaDescriptor;
use crate::projection::{self, CropRect};
use crate::raster::{crop_size, render_tile, RasterSource};

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 900;

/// Configuration for an [`AreaTileCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCacheConfig {
    /// Directory holding the on-disk tile entries.
    pub cache_directory: PathBuf,

    /// Width of produced tiles in pixels.
    pub tile_width: u32,

    /// Height of produced tiles in pixels.
    pub tile_height: u32,
}

impl TileCacheConfig {
    /// Create a config with the default 900×900 tile size.
    pub fn new(cache_directory: impl Into<PathBuf>) -> Self {
        Self {
            cache_directory: cache_directory.into(),
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
        }
    }

    /// Set the produced tile size.
    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }
}

/// Tiered cache for the tile of the currently configured area.
///
/// Single-writer: every mutating operation takes `&mut self`. Separate
/// processes sharing a cache directory are not coordinated; the
/// delete-then-write of an entry is not atomic and a concurrent reader can
/// observe it missing.
pub struct AreaTileCache {
    config: TileCacheConfig,
    store: TileStore,
    raster: Box<dyn RasterSource>,
    descriptor: Option<AreaDescriptor>,
    tile: Option<Tile>,
}

impl AreaTileCache {
    /// Create an unconfigured cache.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache directory and tile size
    /// * `raster` - Where the reference raster is loaded from on a full miss
    pub fn new(config: TileCacheConfig, raster: impl RasterSource + 'static) -> Self {
        let store = TileStore::new(config.cache_directory.clone());
        Self {
            config,
            store,
            raster: Box::new(raster),
            descriptor: None,
            tile: None,
        }
    }

    /// The cache configuration.
    pub fn config(&self) -> &TileCacheConfig {
        &self.config
    }

    /// The on-disk tier.
    pub fn store(&self) -> &TileStore {
        &self.store
    }

    /// Whether an area has been configured.
    pub fn has_config(&self) -> bool {
        self.descriptor.is_some()
    }

    /// The currently configured area.
    pub fn descriptor(&self) -> Option<&AreaDescriptor> {
        self.descriptor.as_ref()
    }

    /// Path of the on-disk entry for the current area.
    pub fn cache_file(&self) -> Option<PathBuf> {
        self.descriptor
            .as_ref()
            .map(|d| self.store.entry_path(d.area_id()))
    }

    /// The tile in the memory tier, without consulting disk or rendering.
    pub fn cached_tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// Replace the configured area.
    ///
    /// Always clears the memory tier, even when `descriptor` equals the
    /// current one. Disk entries of the old and new area are left untouched.
    pub fn reconfigure(&mut self, descriptor: AreaDescriptor) {
        info!(
            area_id = descriptor.area_id(),
            bbox = %descriptor.bounding_box(),
            "Area configured"
        );
        self.descriptor = Some(descriptor);
        self.tile = None;
    }

    /// Ingest config text and reconfigure with the result.
    ///
    /// Nothing changes if the text cannot be ingested.
    pub fn reload_config(&mut self, text: &str) -> Result<(), TileCacheError> {
        let descriptor = AreaDescriptor::from_config_text(text)?;
        self.reconfigure(descriptor);
        Ok(())
    }

    /// Consume a pending config drop, if any, and reconfigure from it.
    ///
    /// Returns `false` when no drop was pending. Drops are consumed even if
    /// their text fails to ingest, so a malformed drop cannot block later
    /// ones.
    pub fn find_and_reload_config(&mut self, drops: &DropDirectory) -> Result<bool, TileCacheError> {
        let Some(text) = drops.take_first()? else {
            return Ok(false);
        };
        self.reload_config(&text)?;
        Ok(true)
    }

    /// Crop rectangle of the current area on the reference raster.
    pub fn crop_rect(&self) -> Result<CropRect, TileCacheError> {
        let descriptor = self.current()?;
        Ok(projection::project(descriptor.bounding_box()))
    }

    /// Get the tile for the current area.
    ///
    /// Tries memory, then the disk entry, then renders from the reference
    /// raster. A disk or render result is stored through
    /// [`store_tile`](Self::store_tile), which rewrites the disk entry even
    /// when it was just read from there.
    ///
    /// # Errors
    ///
    /// - [`TileCacheError::NotConfigured`] if no area is configured
    /// - [`TileCacheError::ReferenceRasterUnavailable`] on a full miss with a
    ///   missing or corrupt reference raster
    /// - [`TileCacheError::DegenerateCrop`] if the area projects to no pixels
    /// - [`TileCacheError::CropTooLarge`] if the area projects to a crop too
    ///   large to render
    /// - storage errors from reading or writing the disk entry
    pub fn get_tile(&mut self) -> Result<&Tile, TileCacheError> {
        let area_id = self.current()?.area_id().to_string();

        if let Some(tile) = self.tile.take() {
            debug!(area_id = %area_id, "Tile served from memory");
            return Ok(&*self.tile.insert(tile));
        }

        let image = match self.store.load(&area_id)? {
            Some(image) => {
                debug!(area_id = %area_id, "Tile loaded from disk cache");
                image
            }
            None => self.compute_tile()?,
        };
        self.store_tile(image)
    }

    /// Set the tile for the current area.
    ///
    /// Deletes any existing disk entry for the area, writes `image` in its
    /// place and then puts it in the memory tier. If writing fails the
    /// memory tier is left as it was.
    pub fn store_tile(&mut self, image: RgbaImage) -> Result<&Tile, TileCacheError> {
        let area_id = self.current()?.area_id().to_string();
        let path = self.store.replace(&area_id, &image)?;
        debug!(area_id = %area_id, path = %path.display(), "Tile stored");
        Ok(&*self.tile.insert(Tile::new(area_id, image)))
    }

    /// Render the current area's tile from the reference raster.
    ///
    /// Does not consult or update either cache tier.
    pub fn compute_tile(&self) -> Result<RgbaImage, TileCacheError> {
        let descriptor = self.current()?;
        let rect = projection::project(descriptor.bounding_box());
        crop_size(rect)?;

        info!(
            area_id = descriptor.area_id(),
            %rect,
            raster = %self.raster.describe(),
            "Rendering tile"
        );
        let reference = self.raster.load()?;
        render_tile(
            &reference,
            rect,
            self.config.tile_width,
            self.config.tile_height,
        )
    }

    fn current(&self) -> Result<&AreaDescriptor, TileCacheError> {
        self.descriptor.as_ref().ok_or(TileCacheError::NotConfigured)
    }
}

//! Error types for the area tile cache.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::dump::DropError;
use crate::ingest::IngestError;
use crate::projection::CropRect;

/// Errors that can occur while resolving, computing or storing a tile.
///
/// Environment failures (missing reference raster, unwritable cache
/// directory) are propagated as-is and never retried.
#[derive(Debug, Error)]
pub enum TileCacheError {
    /// A tile was requested before any area was configured.
    #[error("No area configured: load an area config before requesting a tile")]
    NotConfigured,

    /// The reference raster could not be opened or decoded.
    #[error("Reference raster unavailable at {}: {source}", path.display())]
    ReferenceRasterUnavailable {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The projected crop rectangle encloses no pixels.
    #[error("Crop rectangle {0} encloses no pixels")]
    DegenerateCrop(CropRect),

    /// The projected crop rectangle is too large to render.
    #[error("Crop rectangle {rect} exceeds the crop limit of {max_side} pixels per side or {max_pixels} pixels in total")]
    CropTooLarge {
        rect: CropRect,
        max_side: u32,
        max_pixels: u64,
    },

    /// An existing cache entry could not be decoded.
    #[error("Failed to read cached tile {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A tile could not be encoded to its cache entry.
    #[error("Failed to write cached tile {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A stale cache entry could not be removed before rewriting it.
    #[error("Failed to remove cached tile {}: {source}", path.display())]
    CacheRemove { path: PathBuf, source: io::Error },

    /// The cache directory could not be created.
    #[error("Failed to create cache directory {}: {source}", path.display())]
    CacheDirectory { path: PathBuf, source: io::Error },

    /// Area config text could not be ingested.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Config drops could not be discovered or consumed.
    #[error(transparent)]
    Drop(#[from] DropError),
}

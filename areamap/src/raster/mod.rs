//! Reference raster access and tile rendering.
//!
//! The [`RasterSource`] trait abstracts where the reference raster comes
//! from, so the tile cache can be exercised with synthetic images and so
//! callers can choose whether the (large) reference image stays in memory
//! between computations.
//!
//! - [`FileRaster`] decodes the file on every load
//! - [`MemoizedRaster`] wraps another source and keeps the first successful
//!   load

mod render;

pub use render::{
    crop_size, render_tile, MAX_CROP_DIMENSION, MAX_CROP_PIXELS, PADDING, TRANSPARENT_PADDING,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use parking_lot::Mutex;
use tracing::debug;

use crate::cache::TileCacheError;

/// Source of the reference raster.
///
/// Implementations must be thread-safe (`Send + Sync`); a tile cache may be
/// moved to another thread between computations.
pub trait RasterSource: Send + Sync {
    /// Load the reference raster.
    ///
    /// # Errors
    ///
    /// Returns [`TileCacheError::ReferenceRasterUnavailable`] if the raster is
    /// missing or cannot be decoded.
    fn load(&self) -> Result<Arc<DynamicImage>, TileCacheError>;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}

impl<T: RasterSource + ?Sized> RasterSource for Box<T> {
    fn load(&self) -> Result<Arc<DynamicImage>, TileCacheError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Reference raster read from a file on every load.
#[derive(Debug, Clone)]
pub struct FileRaster {
    path: PathBuf,
}

impl FileRaster {
    /// Create a source for the raster at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the raster file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for FileRaster {
    fn load(&self) -> Result<Arc<DynamicImage>, TileCacheError> {
        debug!(path = %self.path.display(), "Loading reference raster");
        image::open(&self.path)
            .map(Arc::new)
            .map_err(|source| TileCacheError::ReferenceRasterUnavailable {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Wraps a source and keeps the first successfully loaded raster.
///
/// Failed loads are not remembered; the next call tries again.
pub struct MemoizedRaster<S> {
    inner: S,
    loaded: Mutex<Option<Arc<DynamicImage>>>,
}

impl<S: RasterSource> MemoizedRaster<S> {
    /// Memoize loads from `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            loaded: Mutex::new(None),
        }
    }

    /// Whether a raster is currently held in memory.
    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().is_some()
    }

    /// Drop the held raster so the next load reads the source again.
    pub fn forget(&self) {
        *self.loaded.lock() = None;
    }
}

impl<S: RasterSource> RasterSource for MemoizedRaster<S> {
    fn load(&self) -> Result<Arc<DynamicImage>, TileCacheError> {
        let mut loaded = self.loaded.lock();
        if let Some(raster) = loaded.as_ref() {
            return Ok(Arc::clone(raster));
        }
        let raster = self.inner.load()?;
        *loaded = Some(Arc::clone(&raster));
        Ok(raster)
    }

    fn describe(&self) -> String {
        format!("{} (memoized)", self.inner.describe())
    }
}

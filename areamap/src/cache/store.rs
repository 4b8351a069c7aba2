//! On-disk tile entries.
//!
//! Each area has at most one entry, `map_<area_id>.png`, directly inside the
//! cache directory. Entries are never expired; an entry for an area that is
//! no longer configured stays until [`clear_tile_cache`] removes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use super::TileCacheError;

/// File name prefix of every tile entry.
pub const ENTRY_PREFIX: &str = "map_";

/// File extension of every tile entry.
pub const ENTRY_EXTENSION: &str = "png";

/// Tile entries in one cache directory.
#[derive(Debug, Clone)]
pub struct TileStore {
    directory: PathBuf,
}

impl TileStore {
    /// Create a store rooted at `directory`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The cache directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the entry for `area_id`, whether or not it exists.
    pub fn entry_path(&self, area_id: &str) -> PathBuf {
        self.directory
            .join(format!("{ENTRY_PREFIX}{area_id}.{ENTRY_EXTENSION}"))
    }

    /// Whether an entry exists for `area_id`.
    pub fn contains(&self, area_id: &str) -> bool {
        self.entry_path(area_id).is_file()
    }

    /// Load the entry for `area_id`, converted to RGBA.
    ///
    /// Returns `Ok(None)` when there is no entry.
    pub fn load(&self, area_id: &str) -> Result<Option<RgbaImage>, TileCacheError> {
        let path = self.entry_path(area_id);
        if !path.is_file() {
            return Ok(None);
        }
        let image = image::open(&path)
            .map_err(|source| TileCacheError::CacheRead {
                path: path.clone(),
                source,
            })?
            .into_rgba8();
        Ok(Some(image))
    }

    /// Overwrite the entry for `area_id` with `image`.
    ///
    /// An existing entry is deleted before the new one is written. The two
    /// steps are not atomic: another process may briefly see no entry.
    pub fn replace(&self, area_id: &str, image: &RgbaImage) -> Result<PathBuf, TileCacheError> {
        fs::create_dir_all(&self.directory).map_err(|source| TileCacheError::CacheDirectory {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.entry_path(area_id);
        if path.exists() {
            debug!(path = %path.display(), "Removing existing cache entry");
            fs::remove_file(&path).map_err(|source| TileCacheError::CacheRemove {
                path: path.clone(),
                source,
            })?;
        }

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| TileCacheError::CacheWrite {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "Wrote cache entry");
        Ok(path)
    }
}

/// Result of clearing a cache directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearResult {
    /// Number of entries deleted.
    pub files_deleted: usize,
    /// Total size of the deleted entries in bytes.
    pub bytes_freed: u64,
}

fn is_entry(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(ENTRY_PREFIX));
    let ext_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ENTRY_EXTENSION));
    name_matches && ext_matches && path.is_file()
}

fn entries(directory: &Path) -> io::Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if is_entry(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Delete every tile entry in `directory`.
///
/// Other files in the directory are left alone. A missing directory counts
/// as empty.
pub fn clear_tile_cache(directory: &Path) -> io::Result<ClearResult> {
    let mut result = ClearResult::default();
    for path in entries(directory)? {
        let size = fs::metadata(&path)?.len();
        fs::remove_file(&path)?;
        result.files_deleted += 1;
        result.bytes_freed += size;
    }
    Ok(result)
}

/// Count tile entries in `directory` and their total size in bytes.
pub fn tile_cache_stats(directory: &Path) -> io::Result<(usize, u64)> {
    let paths = entries(directory)?;
    let mut bytes = 0;
    for path in &paths {
        bytes += fs::metadata(path)?.len();
    }
    Ok((paths.len(), bytes))
}

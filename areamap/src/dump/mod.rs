//! Config drop discovery.
//!
//! Area announcements arrive as files dropped into a dump directory. A drop
//! is any regular file whose name matches a glob pattern (by default
//! `*DWRI*`). Consuming drops reads the first one in path order and deletes
//! every match, whether or not it was the one read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Default file name pattern of config drops.
pub const DEFAULT_DROP_PATTERN: &str = "*DWRI*";

/// Errors that can occur while discovering or consuming config drops.
#[derive(Debug, Error)]
pub enum DropError {
    /// The file name pattern is not a valid glob.
    #[error("Invalid drop pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A directory entry could not be inspected while scanning.
    #[error("Failed to scan dump directory: {0}")]
    Scan(#[from] glob::GlobError),

    /// A drop could not be read.
    #[error("Failed to read config drop {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A drop could not be deleted after being consumed.
    #[error("Failed to delete config drop {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// A directory that receives config drops.
#[derive(Debug, Clone)]
pub struct DropDirectory {
    directory: PathBuf,
    pattern: String,
}

impl DropDirectory {
    /// Watch `directory` for files matching [`DEFAULT_DROP_PATTERN`].
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pattern: DEFAULT_DROP_PATTERN.to_string(),
        }
    }

    /// Use a different file name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// The dump directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The file name pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// List pending drops, sorted by path.
    ///
    /// A missing dump directory has no pending drops.
    pub fn pending(&self) -> Result<Vec<PathBuf>, DropError> {
        // Escape the directory so only the file name part is a pattern
        let escaped = glob::Pattern::escape(&self.directory.to_string_lossy());
        let full = Path::new(&escaped).join(&self.pattern);
        let full = full.to_string_lossy();

        let paths = glob::glob(&full).map_err(|source| DropError::InvalidPattern {
            pattern: self.pattern.clone(),
            source,
        })?;

        let mut drops = Vec::new();
        for path in paths {
            let path = path?;
            if path.is_file() {
                drops.push(path);
            }
        }
        drops.sort();
        debug!(
            directory = %self.directory.display(),
            count = drops.len(),
            "Scanned for config drops"
        );
        Ok(drops)
    }

    /// Read the first pending drop and delete all pending drops.
    ///
    /// Returns `Ok(None)` when nothing is pending. If reading fails nothing
    /// is deleted.
    pub fn take_first(&self) -> Result<Option<String>, DropError> {
        let drops = self.pending()?;
        let Some(first) = drops.first() else {
            return Ok(None);
        };

        let text = fs::read_to_string(first).map_err(|source| DropError::Read {
            path: first.clone(),
            source,
        })?;

        for path in &drops {
            fs::remove_file(path).map_err(|source| DropError::Remove {
                path: path.clone(),
                source,
            })?;
        }
        info!(
            drop = %first.display(),
            discarded = drops.len() - 1,
            "Consumed config drop"
        );
        Ok(Some(text))
    }
}

//! CLI command implementations.
//!
//! - [`cache`] - Tile cache management (clear, stats)
//! - [`init`] - Settings file initialization
//! - [`poll`] - Consume config drops and render their tiles
//! - [`project`] - Show where an area falls on the reference raster
//! - [`render`] - Render the tile for an area config file

pub mod cache;
pub mod common;
pub mod init;
pub mod poll;
pub mod project;
pub mod render;

//! AreaMap - Cropped area maps from a single reference raster
//!
//! This library derives a fixed-size map tile for a named geographic area
//! from one large Mercator-like reference raster and caches it in memory and
//! on disk, so that repeated requests for the same area do not re-crop the
//! reference image.
//!
//! # Architecture
//!
//! ```text
//! config drop ──► ingest ──► AreaDescriptor ──► AreaTileCache
//!                                                  │
//!                                  memory ─► disk ─► projection + raster
//! ```
//!
//! - [`ingest`] parses the `key=value` area announcement format
//! - [`projection`] maps a bounding box onto reference raster pixels
//! - [`raster`] loads the reference raster and renders tiles
//! - [`cache`] owns the tiered tile lookup
//! - [`dump`] discovers and consumes config drops

pub mod cache;
pub mod config;
pub mod dump;
pub mod ingest;
pub mod logging;
pub mod projection;
pub mod raster;

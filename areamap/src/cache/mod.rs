//! Tiered caching of area tiles.
//!
//! [`AreaTileCache`] holds the configured [`AreaDescriptor`](crate::ingest::AreaDescriptor)
//! and resolves its [`Tile`] from memory, from the on-disk [`TileStore`], or
//! by rendering from the reference raster. The store helpers
//! [`clear_tile_cache`] and [`tile_cache_stats`] manage entries left behind
//! by earlier areas.

mod area;
mod error;
mod store;
mod tile;

pub use area::{AreaTileCache, TileCacheConfig, DEFAULT_TILE_SIZE};
pub use error::TileCacheError;
pub use store::{
    clear_tile_cache, tile_cache_stats, ClearResult, TileStore, ENTRY_EXTENSION, ENTRY_PREFIX,
};
pub use tile::Tile;

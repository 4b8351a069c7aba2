//! Integration tests for the area tile cache.
//!
//! These tests drive the full flow against a reference raster written to a
//! temporary directory:
//! - config text → descriptor → tile
//! - memory, disk and render tiers across cache instances
//! - config drops consumed from a dump directory
//!
//! Run with: `cargo test --test tile_cache_integration`

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use areamap::cache::{AreaTileCache, TileCacheConfig, TileCacheError};
use areamap::dump::DropDirectory;
use areamap::ingest::{AreaDescriptor, BoundingBox};
use areamap::projection::{project, CropRect};
use areamap::raster::{FileRaster, MemoizedRaster};

// ============================================================================
// Helper Functions
// ============================================================================

/// Area near the raster origin, projecting to (14, 54, 142, 202).
const NEAR_ORIGIN: &str = "DWR_Area_ID=\"NW01\"\nCoordinates=\"(52.3,-130.7)\";\"(51.8,-130.0)\"";

/// Same bounding box as `NEAR_ORIGIN` under a different id.
const NEAR_ORIGIN_OTHER_ID: &str =
    "DWR_Area_ID=\"NW02\"\nCoordinates=\"(52.3,-130.7)\";\"(51.8,-130.0)\"";

/// Write a 256×256 gradient reference raster and return its path.
fn write_reference(dir: &Path) -> PathBuf {
    let path = dir.join("reference.png");
    RgbImage::from_fn(256, 256, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]))
        .save(&path)
        .unwrap();
    path
}

struct Fixture {
    _temp_dir: TempDir,
    cache_dir: PathBuf,
    dump_dir: PathBuf,
    reference: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let reference = write_reference(temp_dir.path());
        let cache_dir = temp_dir.path().join("cache");
        let dump_dir = temp_dir.path().join("dump");
        fs::create_dir_all(&dump_dir).unwrap();
        Self {
            _temp_dir: temp_dir,
            cache_dir,
            dump_dir,
            reference,
        }
    }

    fn cache(&self) -> AreaTileCache {
        AreaTileCache::new(
            TileCacheConfig::new(&self.cache_dir),
            FileRaster::new(&self.reference),
        )
    }

    fn drop_file(&self, name: &str, text: &str) {
        fs::write(self.dump_dir.join(name), text).unwrap();
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_produced_tile_is_900_square_with_alpha() {
    let fixture = Fixture::new();
    let mut cache = fixture.cache();
    cache.reload_config(NEAR_ORIGIN).unwrap();

    let tile = cache.get_tile().unwrap();

    assert_eq!(tile.area_id(), "NW01");
    assert_eq!((tile.width(), tile.height()), (900, 900));
    assert_eq!(tile.image().sample_layout().channels, 4);
}

#[test]
fn test_disk_entry_survives_a_fresh_instance() {
    let fixture = Fixture::new();

    let produced = {
        let mut cache = fixture.cache();
        cache.reload_config(NEAR_ORIGIN).unwrap();
        cache.get_tile().unwrap().clone()
    };

    // Remove the reference raster: the fresh instance must not need it
    fs::remove_file(&fixture.reference).unwrap();

    let mut fresh = fixture.cache();
    fresh.reload_config(NEAR_ORIGIN).unwrap();
    let restored = fresh.get_tile().unwrap();

    assert_eq!(restored.image(), produced.image());
}

#[test]
fn test_repeated_requests_keep_disk_content() {
    let fixture = Fixture::new();
    let mut cache = fixture.cache();
    cache.reload_config(NEAR_ORIGIN).unwrap();

    let first = cache.get_tile().unwrap().clone();
    let entry = cache.cache_file().unwrap();
    let bytes_after_first = fs::read(&entry).unwrap();

    let second = cache.get_tile().unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(fs::read(&entry).unwrap(), bytes_after_first);
}

#[test]
fn test_same_box_different_id_is_recomputed() {
    let fixture = Fixture::new();
    let mut cache = fixture.cache();

    cache.reload_config(NEAR_ORIGIN).unwrap();
    let first = cache.get_tile().unwrap().clone();

    cache.reload_config(NEAR_ORIGIN_OTHER_ID).unwrap();
    let second = cache.get_tile().unwrap().clone();

    assert_eq!(first.area_id(), "NW01");
    assert_eq!(second.area_id(), "NW02");
    assert_eq!(first.image(), second.image());
    assert!(cache.store().contains("NW01"));
    assert!(cache.store().contains("NW02"));
}

#[test]
fn test_missing_reference_raster_is_propagated() {
    let fixture = Fixture::new();
    fs::remove_file(&fixture.reference).unwrap();

    let mut cache = fixture.cache();
    cache.reload_config(NEAR_ORIGIN).unwrap();

    assert!(matches!(
        cache.get_tile(),
        Err(TileCacheError::ReferenceRasterUnavailable { .. })
    ));
    assert!(cache.cached_tile().is_none());
}

#[test]
fn test_tile_size_ignores_aspect_ratio() {
    let fixture = Fixture::new();
    let mut cache = AreaTileCache::new(
        TileCacheConfig::new(&fixture.cache_dir).with_tile_size(120, 80),
        MemoizedRaster::new(FileRaster::new(&fixture.reference)),
    );

    for (id, bbox) in [
        ("WIDE", BoundingBox::new(52.3, -130.7, 52.2, -129.5)),
        ("TALL", BoundingBox::new(52.4, -130.7, 51.5, -130.6)),
    ] {
        cache.reconfigure(AreaDescriptor::new(id, bbox).unwrap());
        let tile = cache.get_tile().unwrap();
        assert_eq!((tile.width(), tile.height()), (120, 80), "area {}", id);
    }
}

#[test]
fn test_tile_matches_projected_region() {
    let fixture = Fixture::new();
    let mut cache = AreaTileCache::new(
        TileCacheConfig::new(&fixture.cache_dir).with_tile_size(128, 148),
        FileRaster::new(&fixture.reference),
    );
    cache.reload_config(NEAR_ORIGIN).unwrap();

    let rect = cache.crop_rect().unwrap();
    assert_eq!(rect, CropRect::new(14, 54, 142, 202));
    assert_eq!(rect, project(cache.descriptor().unwrap().bounding_box()));

    // Crop and tile have the same size, so pixels map one to one
    let tile = cache.get_tile().unwrap();
    let expected = image::Rgba([14, 54, 14 ^ 54, 255]);
    assert_eq!(tile.image().get_pixel(0, 0), &expected);
}

#[test]
fn test_config_drop_flow() {
    let fixture = Fixture::new();
    let drops = DropDirectory::new(&fixture.dump_dir);
    let mut cache = fixture.cache();

    assert!(!cache.find_and_reload_config(&drops).unwrap());
    assert!(!cache.has_config());

    fixture.drop_file("01_DWRI.txt", NEAR_ORIGIN);
    fixture.drop_file("02_DWRI.txt", NEAR_ORIGIN_OTHER_ID);

    assert!(cache.find_and_reload_config(&drops).unwrap());
    assert_eq!(cache.descriptor().unwrap().area_id(), "NW01");
    assert!(drops.pending().unwrap().is_empty());

    assert_eq!(cache.get_tile().unwrap().area_id(), "NW01");
}

#[test]
fn test_malformed_drop_is_consumed_and_reported() {
    let fixture = Fixture::new();
    let drops = DropDirectory::new(&fixture.dump_dir);
    let mut cache = fixture.cache();

    fixture.drop_file("bad_DWRI", "DWR_Area_ID=\"X\"\nCoordinates=\"(1,2)\";\"(3,4)\";\"(5,6)\"");

    let result = cache.find_and_reload_config(&drops);

    assert!(matches!(result, Err(TileCacheError::Ingest(_))));
    assert!(!cache.has_config());
    assert!(drops.pending().unwrap().is_empty());
}

//! The tile value held by the cache.

use image::RgbaImage;

/// A rendered area map.
///
/// Always RGBA. Tagged with the id of the area it was produced or loaded
/// for, so callers can tell which area a tile belongs to after the cache has
/// been reconfigured.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    area_id: String,
    image: RgbaImage,
}

impl Tile {
    /// Wrap an image as the tile for `area_id`.
    pub fn new(area_id: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            area_id: area_id.into(),
            image,
        }
    }

    /// Id of the area this tile belongs to.
    pub fn area_id(&self) -> &str {
        &self.area_id
    }

    /// The tile pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the tile, returning its pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

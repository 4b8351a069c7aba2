//! Crop, resize and convert a region of the reference raster into a tile.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::cache::TileCacheError;
use crate::projection::CropRect;

/// Fill for the parts of a crop outside an opaque reference raster.
pub const PADDING: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fill for the parts of a crop outside a reference raster with alpha.
pub const TRANSPARENT_PADDING: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Largest crop edge accepted, in pixels.
pub const MAX_CROP_DIMENSION: u32 = 65_535;

/// Largest crop area accepted, in pixels (1 GiB as RGBA).
pub const MAX_CROP_PIXELS: u64 = 1 << 28;

/// Validate `rect` as a crop and return its size in pixels.
///
/// Needs no raster, so callers can reject a rectangle before loading one.
///
/// # Errors
///
/// - [`TileCacheError::DegenerateCrop`] if `rect` encloses no pixels
/// - [`TileCacheError::CropTooLarge`] if an edge exceeds
///   [`MAX_CROP_DIMENSION`] or the area exceeds [`MAX_CROP_PIXELS`]
pub fn crop_size(rect: CropRect) -> Result<(u32, u32), TileCacheError> {
    if rect.is_degenerate() {
        return Err(TileCacheError::DegenerateCrop(rect));
    }
    let too_large = || TileCacheError::CropTooLarge {
        rect,
        max_side: MAX_CROP_DIMENSION,
        max_pixels: MAX_CROP_PIXELS,
    };

    let (width, height) = rect.pixel_size().ok_or_else(too_large)?;
    if width > MAX_CROP_DIMENSION
        || height > MAX_CROP_DIMENSION
        || u64::from(width) * u64::from(height) > MAX_CROP_PIXELS
    {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Render a tile from `reference`.
///
/// Crops `rect`, resizes the crop to `width`×`height` with a bicubic filter
/// and returns it as RGBA. The aspect ratio of `rect` is not preserved. Any
/// part of `rect` outside the raster is filled with [`TRANSPARENT_PADDING`]
/// if the raster has an alpha channel and [`PADDING`] otherwise.
///
/// # Errors
///
/// Fails as [`crop_size`] does.
pub fn render_tile(
    reference: &DynamicImage,
    rect: CropRect,
    width: u32,
    height: u32,
) -> Result<RgbaImage, TileCacheError> {
    let size = crop_size(rect)?;
    let cropped = crop_padded(reference, rect, size);
    debug!(
        %rect,
        crop_width = cropped.width(),
        crop_height = cropped.height(),
        width,
        height,
        "Resizing crop"
    );

    Ok(imageops::resize(&cropped, width, height, FilterType::CatmullRom))
}

/// Crop `rect` out of `reference`, padding outside the raster bounds.
fn crop_padded(
    reference: &DynamicImage,
    rect: CropRect,
    (width, height): (u32, u32),
) -> RgbaImage {
    let (raster_w, raster_h) = (reference.width() as i64, reference.height() as i64);

    // Intersection of the rectangle with the raster
    let left = rect.left.clamp(0, raster_w);
    let top = rect.top.clamp(0, raster_h);
    let right = rect.right.clamp(0, raster_w);
    let bottom = rect.bottom.clamp(0, raster_h);

    let visible = (right > left && bottom > top).then(|| {
        reference
            .crop_imm(
                left as u32,
                top as u32,
                (right - left) as u32,
                (bottom - top) as u32,
            )
            .to_rgba8()
    });

    match visible {
        Some(visible) if CropRect::new(left, top, right, bottom) == rect => visible,
        visible => {
            let fill = if reference.color().has_alpha() {
                TRANSPARENT_PADDING
            } else {
                PADDING
            };
            let mut canvas = RgbaImage::from_pixel(width, height, fill);
            if let Some(visible) = visible {
                // Non-empty intersection: offsets are below one crop edge
                imageops::replace(&mut canvas, &visible, left - rect.left, top - rect.top);
            }
            canvas
        }
    }
}

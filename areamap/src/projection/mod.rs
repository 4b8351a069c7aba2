//! Projection of geographic bounding boxes onto the reference raster.
//!
//! The reference raster is a Mercator-like map of the continental US. Its
//! longitude axis is linear, so x is a simple ratio against a calibrated
//! meridian. Latitude spacing is not linear: latitudes are first linearized
//! with the inverse Mercator transform, after which y is again a ratio
//! against a calibrated reference latitude.
//!
//! All constants are calibration for that specific raster, not geodesy.

mod types;

pub use types::CropRect;

use crate::ingest::BoundingBox;

/// Maximum linearized latitude represented by the reference raster.
pub const LAT_MAX: f64 = 1.0799224683069641;

/// Linearized latitude of the calibration point.
pub const REF_LAT: f64 = 0.7380009964270406;

/// Longitude offset placing the raster's left edge at x = 0.
pub const LON_OFFSET: f64 = 130.781250;

/// Pixel x of the calibration meridian.
pub const LON_REF_PIXELS: f64 = 7162.0;

/// Degrees of longitude between the left edge and the calibration meridian.
pub const LON_REF_DEGREES: f64 = 39.34135;

/// Pixel y of the calibration latitude.
pub const LAT_REF_PIXELS: f64 = 3565.0;

/// Linearize a latitude in degrees.
///
/// Returns `LAT_MAX - asinh(tan(lat))`, which grows southward and is zero at
/// the raster's top edge.
#[inline]
pub fn linearize(lat: f64) -> f64 {
    LAT_MAX - lat.to_radians().tan().asinh()
}

/// Pixel x for a longitude in degrees.
#[inline]
pub fn lon_to_x(lon: f64) -> f64 {
    (lon + LON_OFFSET) * LON_REF_PIXELS / LON_REF_DEGREES
}

/// Pixel y for a latitude in degrees.
#[inline]
pub fn lat_to_y(lat: f64) -> f64 {
    linearize(lat) * LAT_REF_PIXELS / (LAT_MAX - REF_LAT)
}

/// Project a bounding box to its crop rectangle on the reference raster.
///
/// Pixel positions are truncated toward zero, not rounded. The result is not
/// checked against the raster's extent or for degeneracy.
///
/// # Examples
///
/// ```
/// use areamap::ingest::BoundingBox;
/// use areamap::projection::{project, CropRect};
///
/// let rect = project(&BoundingBox::new(49.0, -125.0, 24.0, -66.0));
/// assert_eq!(rect, CropRect::new(1052, 1002, 11793, 6758));
/// ```
pub fn project(bbox: &BoundingBox) -> CropRect {
    CropRect {
        left: lon_to_x(bbox.lon_left) as i64,
        top: lat_to_y(bbox.lat_top) as i64,
        right: lon_to_x(bbox.lon_right) as i64,
        bottom: lat_to_y(bbox.lat_bottom) as i64,
    }
}

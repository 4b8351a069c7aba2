//! Projection output types.

use std::fmt;

/// Pixel rectangle on the reference raster.
///
/// Coordinates are signed: a bounding box west or north of the raster's
/// calibrated origin projects to negative offsets. The right and bottom edges
/// are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    /// Left edge (x of the west longitude)
    pub left: i64,
    /// Top edge (y of the north latitude)
    pub top: i64,
    /// Right edge (x of the east longitude)
    pub right: i64,
    /// Bottom edge (y of the south latitude)
    pub bottom: i64,
}

impl CropRect {
    /// Create a new crop rectangle.
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels, negative when the rectangle is inverted.
    ///
    /// Widened to `i128` so edges saturated at the `i64` limits cannot
    /// overflow.
    #[inline]
    pub fn width(&self) -> i128 {
        self.right as i128 - self.left as i128
    }

    /// Height in pixels, negative when the rectangle is inverted.
    #[inline]
    pub fn height(&self) -> i128 {
        self.bottom as i128 - self.top as i128
    }

    /// Width and height as image dimensions.
    ///
    /// Returns `None` if the rectangle is degenerate or either side does not
    /// fit in a `u32`.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        if self.is_degenerate() {
            return None;
        }
        let width = u32::try_from(self.width()).ok()?;
        let height = u32::try_from(self.height()).ok()?;
        Some((width, height))
    }

    /// Whether the rectangle encloses no pixels.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let rect = CropRect::new(10, 20, 110, 70);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn test_degenerate() {
        assert!(CropRect::new(10, 0, 10, 5).is_degenerate());
        assert!(CropRect::new(0, 5, 10, 5).is_degenerate());
        assert!(CropRect::new(10, 0, 5, 5).is_degenerate());
        assert!(CropRect::new(0, 10, 5, 5).is_degenerate());
    }

    #[test]
    fn test_dimensions_at_i64_limits() {
        let rect = CropRect::new(i64::MIN, 0, i64::MAX, 10);
        assert_eq!(rect.width(), u64::MAX as i128);
        assert!(!rect.is_degenerate());
        assert_eq!(rect.pixel_size(), None);
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(CropRect::new(-5, 3, 5, 8).pixel_size(), Some((10, 5)));
        assert_eq!(CropRect::new(10, 0, 5, 5).pixel_size(), None);
        assert_eq!(
            CropRect::new(0, 0, u32::MAX as i64 + 1, 1).pixel_size(),
            None
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CropRect::new(-1, 2, 3, 4).to_string(), "(-1, 2, 3, 4)");
    }
}

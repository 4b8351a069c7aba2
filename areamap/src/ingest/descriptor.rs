//! Typed area descriptors extracted from parsed config.

use std::fmt;

use super::error::IngestError;
use super::parser::{parse, ConfigValue, RawConfig};

/// Config key carrying the area identifier.
pub const AREA_ID_KEY: &str = "DWR_Area_ID";

/// Config key carrying the two `(lat,lon)` corners of the area.
pub const COORDINATES_KEY: &str = "Coordinates";

/// Geographic extent of an area, in degrees.
///
/// The top edge is expected to be north of the bottom edge, but this is not
/// enforced beyond all four values being finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Latitude of the top (north) edge
    pub lat_top: f64,
    /// Longitude of the left (west) edge
    pub lon_left: f64,
    /// Latitude of the bottom (south) edge
    pub lat_bottom: f64,
    /// Longitude of the right (east) edge
    pub lon_right: f64,
}

impl BoundingBox {
    /// Create a bounding box from its top-left and bottom-right corners.
    pub fn new(lat_top: f64, lon_left: f64, lat_bottom: f64, lon_right: f64) -> Self {
        Self {
            lat_top,
            lon_left,
            lat_bottom,
            lon_right,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) to ({}, {})",
            self.lat_top, self.lon_left, self.lat_bottom, self.lon_right
        )
    }
}

/// One named geographic area.
///
/// Descriptors are immutable; a new announcement replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaDescriptor {
    area_id: String,
    bounding_box: BoundingBox,
}

impl AreaDescriptor {
    /// Create a descriptor, validating the area id.
    ///
    /// The area id names the on-disk cache entry, so it must be non-empty,
    /// must not contain path separators and must not be `.` or `..`.
    pub fn new(area_id: impl Into<String>, bounding_box: BoundingBox) -> Result<Self, IngestError> {
        let area_id = area_id.into();
        validate_area_id(&area_id)?;
        Ok(Self {
            area_id,
            bounding_box,
        })
    }

    /// Parse config text straight into a descriptor.
    pub fn from_config_text(text: &str) -> Result<Self, IngestError> {
        Self::from_config(&parse(text))
    }

    /// Build a descriptor from already-parsed config.
    pub fn from_config(config: &RawConfig) -> Result<Self, IngestError> {
        let area_id = extract_area_id(config)?;
        let bounding_box = extract_bounding_box(config)?;
        Self::new(area_id, bounding_box)
    }

    /// The externally assigned area identifier.
    pub fn area_id(&self) -> &str {
        &self.area_id
    }

    /// The geographic extent of the area.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}

fn validate_area_id(area_id: &str) -> Result<(), IngestError> {
    let reason = if area_id.is_empty() {
        "must not be empty"
    } else if area_id.contains(['/', '\\']) {
        "must not contain path separators"
    } else if area_id == "." || area_id == ".." {
        "must not be a directory name"
    } else {
        return Ok(());
    };
    Err(IngestError::MalformedValue {
        key: AREA_ID_KEY.to_string(),
        reason: reason.to_string(),
    })
}

/// Extract the area identifier.
///
/// The value has already had its wrapping quotes removed by the parser.
pub fn extract_area_id(config: &RawConfig) -> Result<String, IngestError> {
    match config.get(AREA_ID_KEY) {
        None => Err(IngestError::MissingKey(AREA_ID_KEY.to_string())),
        Some(ConfigValue::Single(id)) => Ok(id.clone()),
        Some(ConfigValue::List(_)) => Err(IngestError::MalformedValue {
            key: AREA_ID_KEY.to_string(),
            reason: "expected a single value, found a list".to_string(),
        }),
    }
}

/// Extract the bounding box from the two `(lat,lon)` corner segments.
///
/// The first segment is the top-left corner, the second the bottom-right.
pub fn extract_bounding_box(config: &RawConfig) -> Result<BoundingBox, IngestError> {
    let value = config
        .get(COORDINATES_KEY)
        .ok_or_else(|| IngestError::MissingKey(COORDINATES_KEY.to_string()))?;

    let segments = value.segments();
    let raw = segments.join(";");
    if segments.len() != 2 {
        return Err(IngestError::coordinates(
            raw,
            format!("expected 2 corners, found {}", segments.len()),
        ));
    }

    let (lat_top, lon_left) = parse_corner(segments[0], &raw)?;
    let (lat_bottom, lon_right) = parse_corner(segments[1], &raw)?;

    Ok(BoundingBox::new(lat_top, lon_left, lat_bottom, lon_right))
}

/// Parse one `(lat,lon)` corner.
fn parse_corner(segment: &str, raw: &str) -> Result<(f64, f64), IngestError> {
    let inner = strip_brackets(segment.trim()).ok_or_else(|| {
        IngestError::coordinates(raw, format!("corner '{}' is not bracketed", segment))
    })?;

    let mut parts = inner.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(IngestError::coordinates(
            raw,
            format!("corner '{}' is not a lat,lon pair", segment),
        ));
    };

    Ok((parse_degrees(lat, raw)?, parse_degrees(lon, raw)?))
}

fn strip_brackets(s: &str) -> Option<&str> {
    [('(', ')'), ('[', ']')]
        .into_iter()
        .find_map(|(open, close)| s.strip_prefix(open)?.strip_suffix(close))
}

fn parse_degrees(s: &str, raw: &str) -> Result<f64, IngestError> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(IngestError::coordinates(
            raw,
            format!("'{}' is not a finite number", s),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOUNCEMENT: &str = "DWR_Area_ID=\"ABC123\"\nCoordinates=\"(40.5,-75.1)\";\"(39.5,-74.1)\"";

    #[test]
    fn test_descriptor_from_announcement() {
        let descriptor = AreaDescriptor::from_config_text(ANNOUNCEMENT).unwrap();

        assert_eq!(descriptor.area_id(), "ABC123");
        assert_eq!(
            *descriptor.bounding_box(),
            BoundingBox::new(40.5, -75.1, 39.5, -74.1)
        );
    }

    #[test]
    fn test_missing_area_id() {
        let result = AreaDescriptor::from_config_text("Coordinates=\"(1,2)\";\"(3,4)\"");
        assert_eq!(
            result.unwrap_err(),
            IngestError::MissingKey(AREA_ID_KEY.to_string())
        );
    }

    #[test]
    fn test_missing_coordinates() {
        let result = AreaDescriptor::from_config_text("DWR_Area_ID=\"X\"");
        assert_eq!(
            result.unwrap_err(),
            IngestError::MissingKey(COORDINATES_KEY.to_string())
        );
    }

    #[test]
    fn test_one_corner_is_malformed() {
        let result = AreaDescriptor::from_config_text("DWR_Area_ID=\"X\"\nCoordinates=\"(1,2)\"");
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedCoordinates { .. }
        ));
    }

    #[test]
    fn test_three_corners_is_malformed() {
        let result = AreaDescriptor::from_config_text(
            "DWR_Area_ID=\"X\"\nCoordinates=\"(1,2)\";\"(3,4)\";\"(5,6)\"",
        );
        let err = result.unwrap_err();
        assert!(matches!(err, IngestError::MalformedCoordinates { .. }));
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn test_non_numeric_component() {
        let result = AreaDescriptor::from_config_text(
            "DWR_Area_ID=\"X\"\nCoordinates=\"(north,2)\";\"(3,4)\"",
        );
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedCoordinates { .. }
        ));
    }

    #[test]
    fn test_non_finite_component() {
        let result =
            AreaDescriptor::from_config_text("DWR_Area_ID=\"X\"\nCoordinates=\"(NaN,2)\";\"(3,4)\"");
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedCoordinates { .. }
        ));
    }

    #[test]
    fn test_corner_with_three_components() {
        let result =
            AreaDescriptor::from_config_text("DWR_Area_ID=\"X\"\nCoordinates=\"(1,2,3)\";\"(3,4)\"");
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedCoordinates { .. }
        ));
    }

    #[test]
    fn test_unbracketed_corner() {
        let result = AreaDescriptor::from_config_text("DWR_Area_ID=\"X\"\nCoordinates=\"1,2\";\"(3,4)\"");
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedCoordinates { .. }
        ));
    }

    #[test]
    fn test_square_brackets_and_spaces() {
        let descriptor = AreaDescriptor::from_config_text(
            "DWR_Area_ID='Z9'\nCoordinates='[ 45.0 , -100.25 ]'; '[44, -99]'",
        )
        .unwrap();
        assert_eq!(descriptor.area_id(), "Z9");
        assert_eq!(
            *descriptor.bounding_box(),
            BoundingBox::new(45.0, -100.25, 44.0, -99.0)
        );
    }

    #[test]
    fn test_empty_area_id_is_rejected() {
        let result =
            AreaDescriptor::from_config_text("DWR_Area_ID=\"\"\nCoordinates=\"(1,2)\";\"(3,4)\"");
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedValue { .. }
        ));
    }

    #[test]
    fn test_area_id_with_path_separator_is_rejected() {
        assert!(AreaDescriptor::new("../etc", BoundingBox::new(1.0, 2.0, 3.0, 4.0)).is_err());
        assert!(AreaDescriptor::new("a/b", BoundingBox::new(1.0, 2.0, 3.0, 4.0)).is_err());
        assert!(AreaDescriptor::new("a\\b", BoundingBox::new(1.0, 2.0, 3.0, 4.0)).is_err());
    }

    #[test]
    fn test_area_id_with_inner_dots_is_accepted() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let descriptor = AreaDescriptor::new("A..B", bbox).unwrap();
        assert_eq!(descriptor.area_id(), "A..B");
        assert!(AreaDescriptor::new("...", bbox).is_ok());
    }

    #[test]
    fn test_dot_area_ids_are_rejected() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        for id in [".", ".."] {
            let err = AreaDescriptor::new(id, bbox).unwrap_err();
            assert!(matches!(err, IngestError::MalformedValue { .. }));
        }
    }

    #[test]
    fn test_area_id_as_list_is_rejected() {
        let result = AreaDescriptor::from_config_text(
            "DWR_Area_ID=\"A\";\"B\"\nCoordinates=\"(1,2)\";\"(3,4)\"",
        );
        assert!(matches!(
            result.unwrap_err(),
            IngestError::MalformedValue { .. }
        ));
    }

    #[test]
    fn test_noise_between_entries() {
        let text = "# DWRI drop\nversion 2\nDWR_Area_ID=\"KDIX\"\n\nCoordinates=\"(41.0,-76.0)\";\"(39.0,-73.0)\"\nEND";
        let descriptor = AreaDescriptor::from_config_text(text).unwrap();
        assert_eq!(descriptor.area_id(), "KDIX");
    }

    #[test]
    fn test_bounding_box_display() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.to_string(), "(1, 2) to (3, 4)");
    }
}

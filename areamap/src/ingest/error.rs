//! Error types for config ingestion.

use thiserror::Error;

/// Errors that can occur while turning config text into an
/// [`AreaDescriptor`](super::AreaDescriptor).
///
/// Ingestion is all-or-nothing: when any of these is returned no descriptor
/// has been produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    /// A required key is not present in the config text.
    #[error("Missing config key: {0}")]
    MissingKey(String),

    /// The coordinates value does not describe two `(lat,lon)` corners.
    #[error("Coordinates \"{value}\" in config are malformed: {reason}")]
    MalformedCoordinates { value: String, reason: String },

    /// A value is present but cannot be used for its key.
    #[error("Invalid value for {key}: {reason}")]
    MalformedValue { key: String, reason: String },
}

impl IngestError {
    pub(crate) fn coordinates(value: impl Into<String>, reason: impl Into<String>) -> Self {
        IngestError::MalformedCoordinates {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_display() {
        let err = IngestError::MissingKey("DWR_Area_ID".to_string());
        assert_eq!(err.to_string(), "Missing config key: DWR_Area_ID");
    }

    #[test]
    fn test_malformed_coordinates_display() {
        let err = IngestError::coordinates("(1,2)", "expected 2 corners, found 1");
        assert_eq!(
            err.to_string(),
            "Coordinates \"(1,2)\" in config are malformed: expected 2 corners, found 1"
        );
    }

    #[test]
    fn test_malformed_value_display() {
        let err = IngestError::MalformedValue {
            key: "DWR_Area_ID".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert!(err.to_string().contains("DWR_Area_ID"));
        assert!(err.to_string().contains("must not be empty"));
    }
}

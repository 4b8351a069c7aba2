//! Config ingestion for area announcements.
//!
//! Turns raw announcement text into an [`AreaDescriptor`]: first the loose
//! `key=value` parse ([`parse`]), then typed extraction of the area id and
//! bounding box.

mod descriptor;
mod error;
mod parser;

pub use descriptor::{
    extract_area_id, extract_bounding_box, AreaDescriptor, BoundingBox, AREA_ID_KEY,
    COORDINATES_KEY,
};
pub use error::IngestError;
pub use parser::{parse, strip_quotes, ConfigValue, RawConfig, LIST_SEPARATOR};

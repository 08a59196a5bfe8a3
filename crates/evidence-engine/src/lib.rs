//! Evidence region resolution
//!
//! Maps a character range of an OCR'd document back to the regions of a page
//! that should be highlighted. Three tiers are tried in order:
//! - table cells that fully cover the range
//! - OCR lines whose text the range matches closely (`lineCoverageThreshold`)
//! - matched words, grouped into visual lines and merged into horizontal runs
//!
//! Polygons stay in page units (inches) until `transform_polygon_to_pixels`
//! maps them onto a rendered canvas.

pub mod error;
pub mod geometry;
pub mod grouping;
pub mod intervals;
pub mod lines;
pub mod options;
pub mod resolver;
pub mod tables;
pub mod transform;
pub mod words;

pub use error::OptionsError;
pub use lines::LineCoverage;
pub use options::ResolveOptions;
pub use resolver::{
    compute_smart_bounding_boxes, compute_smart_bounding_boxes_for_spans, EvidenceQuery,
};
pub use transform::{transform_box_to_pixels, transform_polygon_to_pixels, PixelRect};

pub use evidence_types::{
    BoxSource, CellRef, OcrStructure, Polygon, SmartBoundingBox, Span, StructureError,
};

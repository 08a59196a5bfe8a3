pub mod evidence;
pub mod ocr;
pub mod polygon;

pub use evidence::{BoxSource, CellRef, SmartBoundingBox};
pub use ocr::{
    BoundingRegion, Line, OcrStructure, Page, Span, StructureError, Table, TableCell, Word,
};
pub use polygon::{Polygon, PolygonError, POLYGON_COORDS};

use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

/// Which structural tier produced a highlight region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxSource {
    Cell,
    Line,
    Merged,
    Word,
}

impl BoxSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoxSource::Cell => "cell",
            BoxSource::Line => "line",
            BoxSource::Merged => "merged",
            BoxSource::Word => "word",
        }
    }
}

/// Table coordinates of a matched cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub table_index: usize,
    pub row_index: u32,
    pub column_index: u32,
}

/// A resolved highlight region, still in physical page units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBoundingBox {
    pub page_number: u32,
    pub polygon: Polygon,
    pub page_width_inches: f64,
    pub page_height_inches: f64,
    pub source: BoxSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_ref: Option<CellRef>,
}

//! Highlight overlay geometry
//!
//! Converts resolved boxes into the pixel space of a rendered page canvas so
//! the viewer can absolutely-position one highlight element per box.

use evidence_engine::{transform_box_to_pixels, PixelRect};
use evidence_types::{BoxSource, CellRef, SmartBoundingBox};
use serde::{Deserialize, Serialize};

/// A resolved box projected onto a canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelBox {
    pub page_number: u32,
    /// Eight pixel coordinates, same corner order as the source polygon
    pub polygon: Vec<f64>,
    /// Axis-aligned bounds of `polygon`
    pub rect: PixelRect,
    pub source: BoxSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_ref: Option<CellRef>,
}

impl PixelBox {
    pub fn from_box(bbox: &SmartBoundingBox, canvas_width: f64, canvas_height: f64) -> Self {
        let polygon = transform_box_to_pixels(bbox, canvas_width, canvas_height);
        Self {
            page_number: bbox.page_number,
            rect: PixelRect::from_polygon(&polygon),
            polygon: polygon.to_vec(),
            source: bbox.source,
            confidence: bbox.confidence,
            cell_ref: bbox.cell_ref,
        }
    }

    /// Inline CSS placing an absolutely-positioned element over the box
    pub fn css(&self) -> String {
        format!(
            "left: {:.2}px; top: {:.2}px; width: {:.2}px; height: {:.2}px;",
            self.rect.left, self.rect.top, self.rect.width, self.rect.height
        )
    }
}

pub fn to_pixel_boxes(
    boxes: &[SmartBoundingBox],
    canvas_width: f64,
    canvas_height: f64,
) -> Vec<PixelBox> {
    boxes
        .iter()
        .map(|b| PixelBox::from_box(b, canvas_width, canvas_height))
        .collect()
}

//! Coordinate transformation from physical page units to canvas pixels
//!
//! Both spaces share a top-left origin with Y growing downward, so the mapping
//! is a pure per-axis scale. Canvas size changes with zoom and viewport, so
//! this runs at draw time rather than during resolution.

use crate::geometry::bounds_of;
use evidence_types::{Polygon, SmartBoundingBox};
use serde::{Deserialize, Serialize};

/// Scale a polygon from inches to pixels.
///
/// Even indices are X and scale by `canvas_width / page_width_inches`; odd
/// indices are Y and scale by `canvas_height / page_height_inches`. Page
/// dimensions must be positive.
pub fn transform_polygon_to_pixels(
    polygon: &Polygon,
    page_width_inches: f64,
    page_height_inches: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Polygon {
    let scale_x = canvas_width / page_width_inches;
    let scale_y = canvas_height / page_height_inches;

    let mut coords = *polygon.coords();
    for (i, c) in coords.iter_mut().enumerate() {
        *c *= if i % 2 == 0 { scale_x } else { scale_y };
    }
    Polygon::new(coords)
}

/// Scale a resolved box using the page dimensions it carries
pub fn transform_box_to_pixels(
    bbox: &SmartBoundingBox,
    canvas_width: f64,
    canvas_height: f64,
) -> Polygon {
    transform_polygon_to_pixels(
        &bbox.polygon,
        bbox.page_width_inches,
        bbox.page_height_inches,
        canvas_width,
        canvas_height,
    )
}

/// Axis-aligned rectangle for positioning an overlay element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn from_polygon(polygon: &Polygon) -> Self {
        let b = bounds_of(polygon);
        Self {
            left: b.min_x,
            top: b.min_y,
            width: b.width(),
            height: b.height(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimension() -> impl Strategy<Value = f64> {
        1.0f64..2000.0
    }

    proptest! {
        /// Property: a polygon spanning the whole page maps onto the whole canvas
        #[test]
        fn page_corners_map_to_canvas_corners(
            page_w in dimension(),
            page_h in dimension(),
            canvas_w in dimension(),
            canvas_h in dimension(),
        ) {
            let page = Polygon::from_rect(0.0, 0.0, page_w, page_h);
            let px = transform_polygon_to_pixels(&page, page_w, page_h, canvas_w, canvas_h);
            let rect = PixelRect::from_polygon(&px);

            let tolerance = 1e-6 * canvas_w.max(canvas_h);
            prop_assert!(rect.left.abs() < tolerance);
            prop_assert!(rect.top.abs() < tolerance);
            prop_assert!((rect.width - canvas_w).abs() < tolerance);
            prop_assert!((rect.height - canvas_h).abs() < tolerance);
        }

        /// Property: doubling the canvas doubles every coordinate
        #[test]
        fn linear_in_canvas_size(
            coords in prop::array::uniform8(0.0f64..10.0),
            canvas_w in dimension(),
            canvas_h in dimension(),
        ) {
            let polygon = Polygon::new(coords);
            let once = transform_polygon_to_pixels(&polygon, 8.5, 11.0, canvas_w, canvas_h);
            let twice =
                transform_polygon_to_pixels(&polygon, 8.5, 11.0, canvas_w * 2.0, canvas_h * 2.0);

            for (a, b) in once.coords().iter().zip(twice.coords()) {
                prop_assert!((b - 2.0 * a).abs() < 1e-6);
            }
        }
    }
}

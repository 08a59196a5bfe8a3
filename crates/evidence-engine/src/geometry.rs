//! Polygon measurements used by the matching tiers

use evidence_types::Polygon;

/// Axis-aligned extent of a polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest bounds containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_rect(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

pub fn bounds_of(polygon: &Polygon) -> Bounds {
    let (min_x, max_x) = min_max(polygon.xs());
    let (min_y, max_y) = min_max(polygon.ys());
    Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Mean of the four y-coordinates
pub fn center_y(polygon: &Polygon) -> f64 {
    polygon.ys().sum::<f64>() / 4.0
}

pub fn left_x(polygon: &Polygon) -> f64 {
    polygon.xs().fold(f64::INFINITY, f64::min)
}

pub fn right_x(polygon: &Polygon) -> f64 {
    polygon.xs().fold(f64::NEG_INFINITY, f64::max)
}

/// Half-open overlap test: `[a_start, a_end)` and `[b_start, b_end)` share a
/// character. Touching endpoints do not overlap.
pub fn spans_overlap(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
    a_start < b_end && a_end > b_start
}

/// Enclose several polygons in one axis-aligned rectangle.
///
/// A single polygon is returned untouched so a lone word keeps its original
/// (possibly rotated) shape.
pub fn merge_polygons(polygons: &[Polygon]) -> Option<Polygon> {
    match polygons {
        [] => None,
        [single] => Some(*single),
        [first, rest @ ..] => {
            let bounds = rest
                .iter()
                .fold(bounds_of(first), |acc, p| acc.union(&bounds_of(p)));
            Some(bounds.to_polygon())
        }
    }
}

//! Quadrilateral regions in physical page units

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of coordinates in a polygon (4 corners, x/y interleaved)
pub const POLYGON_COORDS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolygonError {
    #[error("Polygon must have 8 coordinates, got {0}")]
    WrongLength(usize),

    #[error("Polygon coordinate {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },
}

/// Four corner points `[x1, y1, x2, y2, x3, y3, x4, y4]` in inches.
///
/// Corner order is whatever the OCR service produced. Nothing here assumes
/// the quadrilateral is convex or axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polygon(pub [f64; POLYGON_COORDS]);

impl Polygon {
    pub fn new(coords: [f64; POLYGON_COORDS]) -> Self {
        Self(coords)
    }

    /// Axis-aligned rectangle from its corners, clockwise from top-left
    pub fn from_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self([min_x, min_y, max_x, min_y, max_x, max_y, min_x, max_y])
    }

    pub fn coords(&self) -> &[f64; POLYGON_COORDS] {
        &self.0
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().step_by(2).copied()
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().skip(1).step_by(2).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl TryFrom<Vec<f64>> for Polygon {
    type Error = PolygonError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Polygon::try_from(value.as_slice())
    }
}

impl TryFrom<&[f64]> for Polygon {
    type Error = PolygonError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        let coords: [f64; POLYGON_COORDS] = value
            .try_into()
            .map_err(|_| PolygonError::WrongLength(value.len()))?;

        if let Some((index, &value)) = coords.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PolygonError::NonFinite { index, value });
        }

        Ok(Polygon(coords))
    }
}

impl From<Polygon> for Vec<f64> {
    fn from(polygon: Polygon) -> Self {
        polygon.to_vec()
    }
}

//! NoGo polygon types.

use serde::{Deserialize, Serialize};

use crate::grid::DepthSample;

/// A polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NogoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl NogoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&DepthSample> for NogoPoint {
    fn from(sample: &DepthSample) -> Self {
        Self::new(sample.lat, sample.lon)
    }
}

/// An insertion-ordered vertex sequence covering part of a NoGo area.
///
/// Polygons are left open: the last vertex is not a repeat of the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NogoPolygon {
    pub points: Vec<NogoPoint>,
}

impl NogoPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<NogoPoint>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: NogoPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed shoelace area in square degrees (lon as x, lat as y).
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.lon * b.lat - b.lon * a.lat;
        }
        sum / 2.0
    }
}

//! Grid indices, depth/tide samples and regular lattice descriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A cell address within a region's grid: `m` is the row, `n` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridIndex {
    pub m: i32,
    pub n: i32,
}

impl GridIndex {
    pub fn new(m: i32, n: i32) -> Self {
        Self { m, n }
    }

    /// Normalise two corners into (min, max) corners of the rectangle they span.
    pub fn span(a: GridIndex, b: GridIndex) -> (GridIndex, GridIndex) {
        (
            GridIndex::new(a.m.min(b.m), a.n.min(b.n)),
            GridIndex::new(a.m.max(b.m), a.n.max(b.n)),
        )
    }

    /// Check if this index lies inside the inclusive rectangle `[lo, hi]`.
    pub fn within(&self, lo: &GridIndex, hi: &GridIndex) -> bool {
        self.m >= lo.m && self.m <= hi.m && self.n >= lo.n && self.n <= hi.n
    }
}

/// Anything addressed by a grid cell.
pub trait GridCell {
    fn m(&self) -> i32;
    fn n(&self) -> i32;

    fn index(&self) -> GridIndex {
        GridIndex::new(self.m(), self.n())
    }
}

/// A bathymetry sample. `depth` is `None` where the grid has no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSample {
    pub m: i32,
    pub n: i32,
    pub lat: f64,
    pub lon: f64,
    pub depth: Option<f64>,
}

impl DepthSample {
    pub fn new(m: i32, n: i32, lat: f64, lon: f64, depth: Option<f64>) -> Self {
        Self {
            m,
            n,
            lat,
            lon,
            depth,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// A copy of this sample carrying a different depth.
    pub fn with_depth(&self, depth: Option<f64>) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }
}

impl GridCell for DepthSample {
    fn m(&self) -> i32 {
        self.m
    }

    fn n(&self) -> i32 {
        self.n
    }
}

/// A tide sample: water level change to subtract from chart depth at one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideSample {
    pub m: i32,
    pub n: i32,
    pub depth: Option<f64>,
    pub time: DateTime<Utc>,
}

impl TideSample {
    pub fn new(m: i32, n: i32, depth: Option<f64>, time: DateTime<Utc>) -> Self {
        Self { m, n, depth, time }
    }
}

impl GridCell for TideSample {
    fn m(&self) -> i32 {
        self.m
    }

    fn n(&self) -> i32 {
        self.n
    }
}

/// Specification of a regular lat/lon lattice.
///
/// Cell `(m, n)` sits at `origin + m * lat_step` latitude and
/// `origin + n * lon_step` longitude. Steps are signed, so a grid whose rows
/// run north to south has a negative `lat_step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows (m direction)
    pub rows: usize,
    /// Number of columns (n direction)
    pub cols: usize,
    /// Position of cell (0, 0)
    pub origin: GeoPoint,
    /// Latitude change per row
    pub lat_step: f64,
    /// Longitude change per column
    pub lon_step: f64,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize, origin: GeoPoint, lat_step: f64, lon_step: f64) -> Self {
        Self {
            rows,
            cols,
            origin,
            lat_step,
            lon_step,
        }
    }

    /// Convert a grid index to its position.
    pub fn index_to_point(&self, index: GridIndex) -> Option<GeoPoint> {
        if !self.contains_index(index) {
            return None;
        }

        Some(GeoPoint::new(
            self.origin.lat + index.m as f64 * self.lat_step,
            self.origin.lon + index.n as f64 * self.lon_step,
        ))
    }

    /// Snap a position to the nearest grid index.
    ///
    /// Returns `None` when the nearest lattice position falls outside the grid.
    pub fn locate(&self, point: &GeoPoint) -> Option<GridIndex> {
        if self.lat_step == 0.0 || self.lon_step == 0.0 {
            return None;
        }

        let m = ((point.lat - self.origin.lat) / self.lat_step).round();
        let n = ((point.lon - self.origin.lon) / self.lon_step).round();

        if !m.is_finite() || !n.is_finite() {
            return None;
        }

        let index = GridIndex::new(m as i32, n as i32);
        self.contains_index(index).then_some(index)
    }

    /// Flat row-major offset of an index.
    pub fn flat_index(&self, index: GridIndex) -> Option<usize> {
        self.contains_index(index)
            .then(|| index.m as usize * self.cols + index.n as usize)
    }

    pub fn contains_index(&self, index: GridIndex) -> bool {
        index.m >= 0
            && index.n >= 0
            && (index.m as usize) < self.rows
            && (index.n as usize) < self.cols
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

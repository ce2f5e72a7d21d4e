//! Geographic points and lat/lon rectangles.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// An axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonRect {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLonRect {
    /// Create a new rectangle from its edges.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Check if a point lies strictly inside the rectangle.
    ///
    /// Points on an edge are outside: a request corner sitting exactly on a
    /// region border is not served by that region.
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        point.lat > self.south
            && point.lat < self.north
            && point.lon > self.west
            && point.lon < self.east
    }

    /// Check if both corners lie strictly inside the rectangle.
    pub fn contains_both(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        self.contains_point(a) && self.contains_point(b)
    }

    /// A rectangle is well formed when its edges are finite and not inverted.
    pub fn is_well_formed(&self) -> bool {
        [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite())
            && self.south < self.north
            && self.west < self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_is_strict() {
        let rect = LatLonRect::new(54.0, 9.0, 56.0, 13.0);
        assert!(rect.contains_point(&GeoPoint::new(55.0, 11.0)));
        assert!(!rect.contains_point(&GeoPoint::new(54.0, 11.0)));
        assert!(!rect.contains_point(&GeoPoint::new(55.0, 13.0)));
    }

    #[test]
    fn test_well_formed() {
        assert!(LatLonRect::new(1.0, 1.0, 2.0, 2.0).is_well_formed());
        assert!(!LatLonRect::new(2.0, 1.0, 1.0, 2.0).is_well_formed());
        assert!(!LatLonRect::new(f64::NAN, 1.0, 2.0, 2.0).is_well_formed());
    }
}

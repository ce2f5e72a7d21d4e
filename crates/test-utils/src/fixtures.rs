//! Common test fixtures for NoGo tests.
//!
//! Positions and request boxes that fall inside (or deliberately outside)
//! the built-in regions.

use chrono::{DateTime, TimeZone, Utc};
use nogo_common::{GeoPoint, NogoRequest};

/// Reference points inside each built-in region, and some outside all of them.
pub mod points {
    use nogo_common::GeoPoint;

    /// North-west origin of generated Sydkattegat grids.
    pub const SYDKATTEGAT_ORIGIN: GeoPoint = GeoPoint { lat: 55.5, lon: 11.0 };

    /// North-west origin of generated Nordkattegat grids.
    pub const NORDKATTEGAT_ORIGIN: GeoPoint = GeoPoint { lat: 57.5, lon: 11.0 };

    /// North-west origin of generated SF Bay grids.
    pub const SF_BAY_ORIGIN: GeoPoint = GeoPoint { lat: 37.8, lon: -122.5 };

    /// North-west origin of generated Humber grids.
    pub const HUMBER_ORIGIN: GeoPoint = GeoPoint { lat: 53.7, lon: -0.3 };

    /// North-west origin of generated Bornholm grids.
    pub const BORNHOLM_ORIGIN: GeoPoint = GeoPoint { lat: 55.2, lon: 14.7 };

    /// Open Atlantic, outside every region.
    pub const MID_ATLANTIC: GeoPoint = GeoPoint { lat: 45.0, lon: -30.0 };
}

/// Common time values for testing.
pub mod time {
    /// A fixed reference time for tests (2024-01-15T12:00:00Z)
    pub const REFERENCE_TIME: &str = "2024-01-15T12:00:00Z";

    /// A reference time with minutes and seconds set (2024-01-15T12:34:56Z)
    pub const UNALIGNED_TIME: &str = "2024-01-15T12:34:56Z";
}

/// The fixed reference time as a `DateTime`.
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// Offset a point by a number of lattice steps (south and east positive).
pub fn step_from(origin: GeoPoint, rows: f64, cols: f64, step: f64) -> GeoPoint {
    GeoPoint::new(origin.lat - rows * step, origin.lon + cols * step)
}

/// A request for the box between two points over a six hour window.
pub fn nogo_request(north_west: GeoPoint, south_east: GeoPoint, draught: f64) -> NogoRequest {
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 34, 56).unwrap();
    NogoRequest::new(
        north_west,
        south_east,
        draught,
        start,
        start + chrono::Duration::hours(6),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nogo_common::RegionTable;

    #[test]
    fn test_origins_resolve_to_expected_regions() {
        let table = RegionTable::builtin();
        let cases = [
            (points::SYDKATTEGAT_ORIGIN, "sydkattegat"),
            (points::NORDKATTEGAT_ORIGIN, "nordkattegat"),
            (points::SF_BAY_ORIGIN, "sf_bay"),
            (points::HUMBER_ORIGIN, "humber"),
            (points::BORNHOLM_ORIGIN, "bornholm"),
        ];
        for (origin, name) in cases {
            let se = step_from(origin, 20.0, 20.0, 0.00111);
            let region = table.resolve(&origin, &se).unwrap();
            assert_eq!(region.name.as_str(), name);
        }

        let far = points::MID_ATLANTIC;
        assert!(table.resolve(&far, &step_from(far, 1.0, 1.0, 0.1)).is_none());
    }

    #[test]
    fn test_reference_time_parses() {
        let parsed: DateTime<Utc> = time::REFERENCE_TIME.parse().unwrap();
        assert_eq!(parsed, reference_time());
    }

    #[test]
    fn test_nogo_request_is_valid() {
        let nw = points::SYDKATTEGAT_ORIGIN;
        let request = nogo_request(nw, step_from(nw, 5.0, 5.0, 0.00111), -7.0);
        assert!(request.validate().is_ok());
    }
}

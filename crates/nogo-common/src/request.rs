//! Inbound NoGo request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NogoError, NogoResult};
use crate::geo::GeoPoint;
use crate::time::TimeWindow;

/// A NoGo request: a bounding box, a vessel draught and a time window.
///
/// Draught uses the grid store's depth convention: depths below chart datum
/// are negative, so a vessel needing 7 m of water asks with `-7.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NogoRequest {
    pub north_west: GeoPoint,
    pub south_east: GeoPoint,
    pub draught: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NogoRequest {
    pub fn new(
        north_west: GeoPoint,
        south_east: GeoPoint,
        draught: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            north_west,
            south_east,
            draught,
            start,
            end,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Reject requests the pipeline cannot meaningfully run.
    pub fn validate(&self) -> NogoResult<()> {
        if !self.north_west.is_valid() {
            return Err(NogoError::InvalidRequest(format!(
                "north-west corner out of range: {:?}",
                self.north_west
            )));
        }
        if !self.south_east.is_valid() {
            return Err(NogoError::InvalidRequest(format!(
                "south-east corner out of range: {:?}",
                self.south_east
            )));
        }
        if self.north_west.lat < self.south_east.lat || self.north_west.lon > self.south_east.lon {
            return Err(NogoError::InvalidRequest(
                "north-west corner must be north and west of the south-east corner".to_string(),
            ));
        }
        if !self.draught.is_finite() {
            return Err(NogoError::InvalidRequest(format!(
                "draught must be finite, got {}",
                self.draught
            )));
        }
        if self.start > self.end {
            return Err(NogoError::InvalidRequest(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(nw: GeoPoint, se: GeoPoint) -> NogoRequest {
        NogoRequest::new(
            nw,
            se,
            -7.0,
            Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_valid_request() {
        let req = request(GeoPoint::new(55.17, 11.668), GeoPoint::new(55.07, 11.868));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_swapped_corners_rejected() {
        let req = request(GeoPoint::new(55.07, 11.868), GeoPoint::new(55.17, 11.668));
        assert!(matches!(req.validate(), Err(NogoError::InvalidRequest(_))));
    }

    #[test]
    fn test_out_of_range_and_nan_rejected() {
        let req = request(GeoPoint::new(95.0, 11.0), GeoPoint::new(55.0, 12.0));
        assert!(req.validate().is_err());

        let mut req = request(GeoPoint::new(55.17, 11.668), GeoPoint::new(55.07, 11.868));
        req.draught = f64::NAN;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut req = request(GeoPoint::new(55.17, 11.668), GeoPoint::new(55.07, 11.868));
        std::mem::swap(&mut req.start, &mut req.end);
        assert!(req.validate().is_err());
    }
}

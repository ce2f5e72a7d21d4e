//! Time window handling for NoGo requests.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The time window a NoGo result is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The same window with minutes, seconds and sub-seconds zeroed on both ends.
    pub fn truncated_to_hour(&self) -> Self {
        Self {
            start: truncate_to_hour(self.start),
            end: truncate_to_hour(self.end),
        }
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// Truncate a timestamp to the whole hour.
pub fn truncate_to_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.duration_trunc(TimeDelta::hours(1)).unwrap_or(dt)
}

//! Outbound NoGo response and response error codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::polygon::NogoPolygon;
use crate::time::TimeWindow;

/// Error codes carried on every response.
///
/// These are outcomes, not failures: a response with a non-zero code is
/// still a well-formed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    Success,
    /// No configured region contains the request box.
    NoDataForArea,
    /// Tide data could not be retrieved; polygons were computed from depth alone.
    TideUnavailable,
}

impl ErrorCode {
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::NoDataForArea => 17,
            ErrorCode::TideUnavailable => 18,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "No error",
            ErrorCode::NoDataForArea => "No data available for this area",
            ErrorCode::TideUnavailable => "Tide data unavailable, result is based on depth only",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Success),
            17 => Some(ErrorCode::NoDataForArea),
            18 => Some(ErrorCode::TideUnavailable),
            _ => None,
        }
    }
}

/// The answer to a NoGo request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NogoResponse {
    pub error_code: u32,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    pub polygons: Vec<NogoPolygon>,
}

impl NogoResponse {
    /// Response for a box outside every configured region. No validity window.
    pub fn no_data_for_area() -> Self {
        Self::with_code(ErrorCode::NoDataForArea, None, Vec::new())
    }

    /// Response for a box with no grid coverage: empty, but not an error.
    pub fn empty(window: TimeWindow) -> Self {
        Self::with_code(ErrorCode::Success, Some(window), Vec::new())
    }

    /// Response carrying computed polygons.
    pub fn computed(code: ErrorCode, window: TimeWindow, polygons: Vec<NogoPolygon>) -> Self {
        Self::with_code(code, Some(window), polygons)
    }

    fn with_code(code: ErrorCode, window: Option<TimeWindow>, polygons: Vec<NogoPolygon>) -> Self {
        let window = window.map(|w| w.truncated_to_hour());
        Self {
            error_code: code.code(),
            error_message: code.message().to_string(),
            valid_from: window.map(|w| w.start),
            valid_to: window.map(|w| w.end),
            polygons,
        }
    }

    pub fn error(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.error_code)
    }
}

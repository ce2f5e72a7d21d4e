//! The grid store seam consumed by the NoGo pipeline.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nogo_common::{DepthSample, GeoPoint, GridIndex, NogoResult, RegionName, TideSample, TimeWindow};

/// Which of a region's two lattices a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    Depth,
    Tide,
}

impl GridKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::Depth => "depth",
            GridKind::Tide => "tide",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of depth and tide grids.
///
/// Implementations return rows in row-major order: ascending `m`, then
/// ascending `n` (tide samples additionally ordered by time). Corner
/// arguments may arrive in any order and describe an inclusive rectangle.
#[async_trait]
pub trait GridStore: Send + Sync {
    /// Snap a position to the nearest index of the region's depth or tide grid.
    ///
    /// `Ok(None)` means the position is outside the populated grid; this is
    /// not an error.
    async fn locate(
        &self,
        region: RegionName,
        kind: GridKind,
        point: GeoPoint,
    ) -> NogoResult<Option<GridIndex>>;

    /// All depth samples inside the rectangle spanned by two corners.
    async fn fetch_depth(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
    ) -> NogoResult<Vec<DepthSample>>;

    /// All tide samples inside the rectangle and time window.
    ///
    /// `Ok(None)` means the store has no tide data to offer for the request.
    async fn fetch_tide(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
        window: TimeWindow,
    ) -> NogoResult<Option<Vec<TideSample>>>;

    /// Verify that the backing store is reachable.
    async fn health_check(&self) -> NogoResult<()> {
        Ok(())
    }
}

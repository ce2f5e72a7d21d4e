//! Draught filtering: keep only the cells a vessel cannot safely enter.

use nogo_common::DepthSample;

use crate::config::UnknownDepthPolicy;
use crate::rows::GridRow;

/// Decides which depth cells are NoGo for a given draught.
///
/// Depth and draught share the store's sign convention. A cell is NoGo when
/// its depth is strictly greater than the draught; a cell exactly at the
/// draught is navigable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraughtFilter {
    pub draught: f64,
    pub unknown_depth: UnknownDepthPolicy,
}

impl DraughtFilter {
    pub fn new(draught: f64, unknown_depth: UnknownDepthPolicy) -> Self {
        Self {
            draught,
            unknown_depth,
        }
    }

    pub fn is_nogo_candidate(&self, sample: &DepthSample) -> bool {
        match sample.depth {
            Some(depth) => depth > self.draught,
            None => self.unknown_depth == UnknownDepthPolicy::Hazard,
        }
    }

    /// Drop every cell that is not a NoGo candidate.
    ///
    /// Rows left empty are kept so row adjacency survives into stitching.
    pub fn apply(&self, rows: Vec<GridRow<DepthSample>>) -> Vec<GridRow<DepthSample>> {
        rows.into_iter()
            .map(|row| {
                let cells = row
                    .cells
                    .into_iter()
                    .filter(|s| self.is_nogo_candidate(s))
                    .collect();
                GridRow::new(row.m, cells)
            })
            .collect()
    }
}

//! Neighbour stitching between consecutive row sections.

use nogo_common::{NogoPoint, NogoPolygon};
use tracing::trace;

use crate::segment::{RowSection, Segment};

/// Check if two segments in neighbouring rows share or touch a column range.
///
/// Diagonal contact (one segment ending in the column before the other
/// starts) counts as touching.
pub fn are_adjacent(a: &Segment, b: &Segment) -> bool {
    a.start() <= b.end() + 1 && b.start() <= a.end() + 1
}

fn clamp_to(segment: &Segment, n: i32) -> i32 {
    n.clamp(segment.start(), segment.end())
}

/// The bridge quadrilateral joining two adjacent segments.
///
/// The bridge spans the shared column window `[lo, hi]`, clamped into each
/// segment, with vertices `A(lo), A(hi), B(hi), B(lo)`. Returns `None` for
/// segments that are not adjacent.
pub fn bridge(a: &Segment, b: &Segment) -> Option<NogoPolygon> {
    if !are_adjacent(a, b) {
        return None;
    }

    let shared_start = a.start().max(b.start());
    let shared_end = a.end().min(b.end());
    let lo = shared_start.min(shared_end);
    let hi = shared_start.max(shared_end);

    let a_lo = a.cell_at(clamp_to(a, lo))?;
    let a_hi = a.cell_at(clamp_to(a, hi))?;
    let b_hi = b.cell_at(clamp_to(b, hi))?;
    let b_lo = b.cell_at(clamp_to(b, lo))?;

    Some(NogoPolygon::from_points(vec![
        NogoPoint::from(a_lo),
        NogoPoint::from(a_hi),
        NogoPoint::from(b_hi),
        NogoPoint::from(b_lo),
    ]))
}

/// Bridge every adjacent segment pair between each section and the next.
///
/// Sections are walked in the given order; the last section has no successor
/// and contributes nothing. Empty sections break the chain.
pub fn stitch(sections: &[RowSection]) -> Vec<NogoPolygon> {
    let mut bridges = Vec::new();

    for pair in sections.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        for a in &current.segments {
            for b in &next.segments {
                if let Some(polygon) = bridge(a, b) {
                    bridges.push(polygon);
                }
            }
        }
        trace!(m = current.m, next_m = next.m, total = bridges.len(), "Stitched row pair");
    }

    bridges
}

//! Polygon emission: padded quadrilaterals for line segments.

use nogo_common::{DepthSample, NogoPoint, NogoPolygon, Region};
use tracing::trace;

use crate::segment::{RowSection, Segment};

/// Padded quadrilateral around a run of cells.
///
/// The first cell is pushed west and the last cell east by `lon_offset`; each
/// is then padded north and south by `lat_offset`. Vertices are emitted
/// north-west, south-west, south-east, north-east.
pub fn line_quad(cells: &[DepthSample], lat_offset: f64, lon_offset: f64) -> Option<NogoPolygon> {
    let first = cells.first()?;
    let last = cells.last()?;

    let west = first.lon - lon_offset;
    let east = last.lon + lon_offset;

    Some(NogoPolygon::from_points(vec![
        NogoPoint::new(first.lat + lat_offset, west),
        NogoPoint::new(first.lat - lat_offset, west),
        NogoPoint::new(last.lat - lat_offset, east),
        NogoPoint::new(last.lat + lat_offset, east),
    ]))
}

/// Merge bridges and line quadrilaterals into the final polygon list.
///
/// Bridges come first, in the order given. Quadrilaterals follow in ascending
/// row order, left to right within a row. Single-cell segments produce no
/// polygon.
pub fn emit(region: &Region, bridges: Vec<NogoPolygon>, sections: &[RowSection]) -> Vec<NogoPolygon> {
    let mut polygons = bridges;

    let mut ordered: Vec<&RowSection> = sections.iter().collect();
    ordered.sort_by_key(|section| section.m);

    for section in ordered {
        for segment in &section.segments {
            match segment {
                Segment::Line(cells) => {
                    polygons.extend(line_quad(cells, region.lat_offset, region.lon_offset));
                }
                Segment::Point(cell) => {
                    trace!(m = cell.m, n = cell.n, "Skipping single-cell segment");
                }
            }
        }
    }

    polygons
}

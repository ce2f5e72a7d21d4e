//! Overlap resolution for bridge polygons.
//!
//! Bridges are convex quadrilaterals (or degenerate ones collapsed onto a line
//! or a point), so a separating-axis test decides whether two of them share
//! interior area. Longitude is treated as x and latitude as y.

use nogo_common::{NogoPoint, NogoPolygon};
use tracing::debug;

/// Projection tolerance, in degrees.
const EPSILON: f64 = 1e-9;

/// Polygons with less area than this (square degrees) have no interior.
const MIN_AREA: f64 = 1e-15;

fn bounds(polygon: &NogoPolygon) -> (f64, f64, f64, f64) {
    polygon.points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.lon), min_y.min(p.lat), max_x.max(p.lon), max_y.max(p.lat))
        },
    )
}

fn project(polygon: &NogoPolygon, axis: (f64, f64)) -> (f64, f64) {
    polygon
        .points
        .iter()
        .map(|p| p.lon * axis.0 + p.lat * axis.1)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Unit normals of every non-degenerate edge.
fn edge_normals(polygon: &NogoPolygon) -> impl Iterator<Item = (f64, f64)> + '_ {
    let points = &polygon.points;
    let count = points.len();

    (0..count).filter_map(move |i| {
        let a: NogoPoint = points[i];
        let b: NogoPoint = points[(i + 1) % count];
        let (dx, dy) = (b.lon - a.lon, b.lat - a.lat);
        let length = dx.hypot(dy);
        if length < EPSILON {
            None
        } else {
            Some((-dy / length, dx / length))
        }
    })
}

fn separated_on(a: &NogoPolygon, b: &NogoPolygon, axis: (f64, f64)) -> bool {
    let (a_lo, a_hi) = project(a, axis);
    let (b_lo, b_hi) = project(b, axis);
    a_hi <= b_lo + EPSILON || b_hi <= a_lo + EPSILON
}

/// Check if two convex polygons share interior area.
///
/// Polygons that only touch along an edge or at a vertex do not overlap, and
/// a polygon without area never overlaps anything.
pub fn polygons_overlap(a: &NogoPolygon, b: &NogoPolygon) -> bool {
    if a.signed_area().abs() < MIN_AREA || b.signed_area().abs() < MIN_AREA {
        return false;
    }

    let (a_min_x, a_min_y, a_max_x, a_max_y) = bounds(a);
    let (b_min_x, b_min_y, b_max_x, b_max_y) = bounds(b);
    let boxes_intersect = a_min_x < b_max_x - EPSILON
        && a_max_x > b_min_x + EPSILON
        && a_min_y < b_max_y - EPSILON
        && a_max_y > b_min_y + EPSILON;
    if !boxes_intersect {
        return false;
    }

    !edge_normals(a)
        .chain(edge_normals(b))
        .any(|axis| separated_on(a, b, axis))
}

/// Keep a maximal subset of polygons with no pairwise overlap.
///
/// Polygons are considered in input order; each one is kept unless it
/// overlaps a polygon already kept.
pub fn resolve_overlaps(polygons: Vec<NogoPolygon>) -> Vec<NogoPolygon> {
    let input = polygons.len();
    let mut kept: Vec<NogoPolygon> = Vec::with_capacity(input);

    for polygon in polygons {
        if !kept.iter().any(|k| polygons_overlap(k, &polygon)) {
            kept.push(polygon);
        }
    }

    debug!(input, kept = kept.len(), "Resolved bridge overlaps");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(west: f64, south: f64, east: f64, north: f64) -> NogoPolygon {
        NogoPolygon::from_points(vec![
            NogoPoint::new(north, west),
            NogoPoint::new(south, west),
            NogoPoint::new(south, east),
            NogoPoint::new(north, east),
        ])
    }

    #[test]
    fn test_overlapping_rectangles() {
        let a = rect(11.0, 55.0, 11.002, 55.002);
        let b = rect(11.001, 55.001, 11.003, 55.003);
        assert!(polygons_overlap(&a, &b));
        assert!(polygons_overlap(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(11.0, 55.0, 11.002, 55.002);
        let b = rect(11.002, 55.0, 11.004, 55.002);
        assert!(!polygons_overlap(&a, &b));
    }

    #[test]
    fn test_separated_by_diagonal_axis() {
        // bounding boxes intersect, the triangles do not
        let a = NogoPolygon::from_points(vec![
            NogoPoint::new(0.0, 0.0),
            NogoPoint::new(0.0, 2.0),
            NogoPoint::new(1.0, 0.0),
        ]);
        let b = NogoPolygon::from_points(vec![
            NogoPoint::new(1.0, 2.0),
            NogoPoint::new(0.6, 2.0),
            NogoPoint::new(1.0, 1.4),
        ]);
        assert!(!polygons_overlap(&a, &b));
    }

    #[test]
    fn test_degenerate_polygon_never_overlaps() {
        let line = NogoPolygon::from_points(vec![
            NogoPoint::new(55.001, 11.0),
            NogoPoint::new(55.001, 11.003),
            NogoPoint::new(55.001, 11.003),
            NogoPoint::new(55.001, 11.0),
        ]);
        let square = rect(11.0, 55.0, 11.002, 55.002);
        assert!(!polygons_overlap(&line, &square));
    }

    #[test]
    fn test_resolve_keeps_first_of_overlapping_pair() {
        let a = rect(11.0, 55.0, 11.002, 55.002);
        let b = rect(11.001, 55.001, 11.003, 55.003);
        let c = rect(12.0, 55.0, 12.002, 55.002);

        let kept = resolve_overlaps(vec![a.clone(), b, c.clone()]);
        assert_eq!(kept, vec![a, c]);
    }

    #[test]
    fn test_resolve_identical_polygons() {
        let a = rect(11.0, 55.0, 11.002, 55.002);
        let kept = resolve_overlaps(vec![a.clone(), a.clone(), a]);
        assert_eq!(kept.len(), 1);
    }
}

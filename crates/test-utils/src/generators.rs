//! Synthetic bathymetry and tide generators.
//!
//! Depths follow the grid store convention: negative values are below chart
//! datum, so deep water is strongly negative and a shoal is close to zero.
//! Grids run north to south (negative latitude step) so that ascending row
//! index moves away from the north-west corner of a request.

use chrono::{DateTime, Duration, Utc};
use grid_store::{InMemoryGridStore, RegionGrid};
use nogo_common::{GeoPoint, GridSpec, RegionName, TideSample};

/// Depth of open water in generated grids.
pub const DEEP_WATER: f64 = -20.0;

/// Depth of a generated shoal.
pub const SHOAL_DEPTH: f64 = -2.0;

/// Depth grid spacing used by the generators, in degrees.
pub const DEPTH_STEP: f64 = 0.00111;

/// A north-to-south depth lattice with its north-west cell at `origin`.
pub fn depth_grid_spec(rows: usize, cols: usize, origin: GeoPoint) -> GridSpec {
    GridSpec::new(rows, cols, origin, -DEPTH_STEP, DEPTH_STEP)
}

/// A tide lattice covering the same area as a depth lattice.
///
/// One tide row spans `rows_per` depth rows and one tide cell spans
/// `cells_per` depth cells.
pub fn tide_grid_spec(depth: &GridSpec, rows_per: usize, cells_per: usize) -> GridSpec {
    GridSpec::new(
        depth.rows.div_ceil(rows_per),
        depth.cols.div_ceil(cells_per),
        depth.origin,
        depth.lat_step * rows_per as f64,
        depth.lon_step * cells_per as f64,
    )
}

/// Creates a depth grid with a constant value everywhere.
pub fn create_constant_depths(rows: usize, cols: usize, value: f64) -> Vec<Option<f64>> {
    vec![Some(value); rows * cols]
}

/// Creates deep water with a rectangular shoal.
///
/// Cells with `m` in `m_range` and `n` in `n_range` (half-open) are set to
/// [`SHOAL_DEPTH`]; everything else is [`DEEP_WATER`].
///
/// # Example
///
/// ```
/// use test_utils::{create_shoal_depths, SHOAL_DEPTH, DEEP_WATER};
///
/// let depths = create_shoal_depths(4, 4, 1..3, 1..3);
/// assert_eq!(depths[0], Some(DEEP_WATER));
/// assert_eq!(depths[5], Some(SHOAL_DEPTH));
/// ```
pub fn create_shoal_depths(
    rows: usize,
    cols: usize,
    m_range: std::ops::Range<usize>,
    n_range: std::ops::Range<usize>,
) -> Vec<Option<f64>> {
    let mut data = Vec::with_capacity(rows * cols);
    for m in 0..rows {
        for n in 0..cols {
            let depth = if m_range.contains(&m) && n_range.contains(&n) {
                SHOAL_DEPTH
            } else {
                DEEP_WATER
            };
            data.push(Some(depth));
        }
    }
    data
}

/// Creates a depth grid from an ASCII chart.
///
/// Each line is one row: `#` is a shoal, `.` deep water and `?` a cell
/// without data. Lines must have equal length.
///
/// ```
/// use test_utils::create_charted_depths;
///
/// let (rows, cols, depths) = create_charted_depths(&["..#", "?##"]);
/// assert_eq!((rows, cols), (2, 3));
/// assert_eq!(depths[3], None);
/// ```
pub fn create_charted_depths(chart: &[&str]) -> (usize, usize, Vec<Option<f64>>) {
    let rows = chart.len();
    let cols = chart.first().map(|line| line.len()).unwrap_or(0);
    let mut data = Vec::with_capacity(rows * cols);
    for line in chart {
        assert_eq!(line.len(), cols, "chart rows must have equal length");
        for c in line.chars() {
            data.push(match c {
                '#' => Some(SHOAL_DEPTH),
                '?' => None,
                _ => Some(DEEP_WATER),
            });
        }
    }
    (rows, cols, data)
}

/// Hourly time steps starting at `start`.
pub fn hourly_steps(start: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    (0..count as i64).map(|h| start + Duration::hours(h)).collect()
}

/// Creates tide samples for every cell of a tide lattice at every time.
///
/// Samples are row-major with all times for a cell adjacent, matching the
/// order the stores return. `level` receives `(m, n, step)`.
pub fn create_tide_samples<F>(grid: &GridSpec, times: &[DateTime<Utc>], level: F) -> Vec<TideSample>
where
    F: Fn(usize, usize, usize) -> Option<f64>,
{
    let mut samples = Vec::with_capacity(grid.len() * times.len());
    for m in 0..grid.rows {
        for n in 0..grid.cols {
            for (step, time) in times.iter().enumerate() {
                samples.push(TideSample::new(m as i32, n as i32, level(m, n, step), *time));
            }
        }
    }
    samples
}

/// A single-region in-memory store holding the given depths.
pub fn create_depth_store(
    region: RegionName,
    grid: GridSpec,
    depths: Vec<Option<f64>>,
) -> InMemoryGridStore {
    let region_grid = RegionGrid::new(grid, depths).expect("generated depths match grid size");
    InMemoryGridStore::new().with_region(region, region_grid)
}

/// A single-region in-memory store holding depths and tides.
pub fn create_tidal_store(
    region: RegionName,
    grid: GridSpec,
    depths: Vec<Option<f64>>,
    tide_grid: GridSpec,
    tides: Vec<TideSample>,
) -> InMemoryGridStore {
    let region_grid = RegionGrid::new(grid, depths)
        .expect("generated depths match grid size")
        .with_tides(tide_grid, tides);
    InMemoryGridStore::new().with_region(region, region_grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_shoal_depths() {
        let depths = create_shoal_depths(5, 6, 1..3, 2..5);
        assert_eq!(depths.len(), 30);
        let shoal = depths.iter().filter(|d| **d == Some(SHOAL_DEPTH)).count();
        assert_eq!(shoal, 6);
        assert_eq!(depths[6 + 2], Some(SHOAL_DEPTH));
        assert_eq!(depths[6 + 1], Some(DEEP_WATER));
    }

    #[test]
    fn test_create_charted_depths() {
        let (rows, cols, depths) = create_charted_depths(&["#.", ".?"]);
        assert_eq!((rows, cols), (2, 2));
        assert_eq!(depths, vec![Some(SHOAL_DEPTH), Some(DEEP_WATER), Some(DEEP_WATER), None]);
    }

    #[test]
    fn test_tide_grid_spec_covers_depth_grid() {
        let depth = depth_grid_spec(11, 17, GeoPoint::new(55.5, 11.0));
        let tide = tide_grid_spec(&depth, 5, 8);
        assert_eq!((tide.rows, tide.cols), (3, 3));
        assert!((tide.lat_step - depth.lat_step * 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_create_tide_samples_order() {
        let grid = GridSpec::new(2, 2, GeoPoint::new(55.0, 11.0), -0.01, 0.01);
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let tides = create_tide_samples(&grid, &hourly_steps(start, 3), |_, n, step| {
            Some((n * 10 + step) as f64)
        });

        assert_eq!(tides.len(), 12);
        assert_eq!((tides[0].m, tides[0].n), (0, 0));
        assert_eq!((tides[3].m, tides[3].n), (0, 1));
        assert_eq!(tides[4].depth, Some(11.0));
        assert_eq!(tides[2].time, start + Duration::hours(2));
    }

    #[test]
    fn test_create_depth_store() {
        let grid = depth_grid_spec(3, 3, GeoPoint::new(55.5, 11.0));
        let store = create_depth_store(RegionName::Sydkattegat, grid, create_constant_depths(3, 3, -5.0));
        assert!(store.region(RegionName::Sydkattegat).is_some());
        assert!(store.region(RegionName::Humber).is_none());
    }
}

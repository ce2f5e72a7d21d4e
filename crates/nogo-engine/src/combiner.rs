//! Tide/depth combination.
//!
//! Tide grids are coarser than depth grids: one tide row covers
//! `depth_rows_per_tide_row` depth rows and one tide cell covers
//! `depth_cells_per_tide_cell` depth cells. When the tide fetch spans several
//! time steps, each tide cell appears once per step; those runs are first
//! collapsed to their lowest value so the correction uses the worst case in
//! the window.
//!
//! The combination is a pure transform: raw depth rows are never modified.

use nogo_common::{DepthSample, TideSample};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::rows::{group_rows, GridRow};

/// Number of leading samples in a tide row sharing the first sample's column.
///
/// Greater than one when the fetch returned several time steps per cell.
pub fn column_multiplicity(first_row: &[TideSample]) -> usize {
    let Some(first) = first_row.first() else {
        return 1;
    };
    first_row.iter().take_while(|t| t.n == first.n).count()
}

/// The sample with the lowest depth in a run.
///
/// A sample with a value always beats one without; among valued samples the
/// first lowest wins.
pub fn lowest_tide(run: &[TideSample]) -> Option<&TideSample> {
    let mut current = run.first()?;

    for candidate in run {
        match (current.depth, candidate.depth) {
            (Some(c), Some(d)) if c > d => current = candidate,
            (None, Some(_)) => current = candidate,
            _ => {}
        }
    }

    Some(current)
}

/// Collapse each run of `n_count` consecutive samples to its lowest sample.
///
/// A trailing run shorter than `n_count` is collapsed on its own.
pub fn densify_tide_row(row: &[TideSample], n_count: usize) -> Vec<TideSample> {
    if n_count <= 1 {
        return row.to_vec();
    }

    row.chunks(n_count)
        .filter_map(lowest_tide)
        .cloned()
        .collect()
}

/// Group tide samples into rows and collapse time steps per cell.
pub fn densify_tide_rows(tide: &[TideSample]) -> Vec<GridRow<TideSample>> {
    let rows = group_rows(tide.iter().cloned());

    let n_count = rows
        .first()
        .map(|row| column_multiplicity(&row.cells))
        .unwrap_or(1);

    if n_count == 1 {
        return rows;
    }

    debug!(n_count, rows = rows.len(), "Densifying tide rows");

    rows.into_iter()
        .map(|row| GridRow::new(row.m, densify_tide_row(&row.cells, n_count)))
        .collect()
}

/// Tide-corrected depth. A missing tide value contributes nothing.
pub fn corrected_depth(raw: Option<f64>, tide: Option<f64>) -> Option<f64> {
    raw.map(|depth| depth - tide.unwrap_or(0.0))
}

/// Correct depth rows with densified tide rows.
///
/// Depth row `r` uses tide row `r / depth_rows_per_tide_row`; depth cell `c`
/// uses tide cell `c / depth_cells_per_tide_cell`. A trailing partial group of
/// rows or cells still uses the next tide row or cell. Depth cells with no
/// matching tide cell are returned unchanged.
pub fn combine(
    depth_rows: &[GridRow<DepthSample>],
    tide_rows: &[GridRow<TideSample>],
    config: &PipelineConfig,
) -> Vec<GridRow<DepthSample>> {
    let rows_per = config.depth_rows_per_tide_row.max(1);
    let cells_per = config.depth_cells_per_tide_cell.max(1);

    depth_rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let tide_row = tide_rows.get(r / rows_per);
            let cells = row
                .cells
                .iter()
                .enumerate()
                .map(|(c, sample)| {
                    match tide_row.and_then(|t| t.cells.get(c / cells_per)) {
                        Some(tide) => sample.with_depth(corrected_depth(sample.depth, tide.depth)),
                        None => sample.clone(),
                    }
                })
                .collect();
            GridRow::new(row.m, cells)
        })
        .collect()
}

/// Densify the tide fetch and apply it to the depth rows.
pub fn tide_correct(
    depth_rows: &[GridRow<DepthSample>],
    tide: &[TideSample],
    config: &PipelineConfig,
) -> Vec<GridRow<DepthSample>> {
    let tide_rows = densify_tide_rows(tide);
    debug!(
        depth_rows = depth_rows.len(),
        tide_rows = tide_rows.len(),
        "Applying tide correction"
    );
    combine(depth_rows, &tide_rows, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tide(m: i32, n: i32, depth: Option<f64>) -> TideSample {
        TideSample::new(m, n, depth, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap())
    }

    fn depth_row(m: i32, depths: &[Option<f64>]) -> GridRow<DepthSample> {
        GridRow::new(
            m,
            depths
                .iter()
                .enumerate()
                .map(|(n, d)| DepthSample::new(m, n as i32, 55.0, 11.0 + n as f64 * 0.001, *d))
                .collect(),
        )
    }

    #[test]
    fn test_densify_takes_lowest_per_run() {
        let row: Vec<_> = [Some(5.0), Some(3.0), Some(4.0), None, Some(2.0), Some(6.0)]
            .iter()
            .enumerate()
            .map(|(i, d)| tide(0, (i / 3) as i32, *d))
            .collect();

        let dense = densify_tide_row(&row, 3);
        let values: Vec<_> = dense.iter().map(|t| t.depth).collect();
        assert_eq!(values, vec![Some(3.0), Some(2.0)]);
    }

    #[test]
    fn test_lowest_tide_prefers_value_over_missing() {
        let run = vec![tide(0, 0, None), tide(0, 0, None), tide(0, 0, Some(1.5))];
        assert_eq!(lowest_tide(&run).unwrap().depth, Some(1.5));

        let all_missing = vec![tide(0, 0, None), tide(0, 0, None)];
        assert_eq!(lowest_tide(&all_missing).unwrap().depth, None);

        assert!(lowest_tide(&[]).is_none());
    }

    #[test]
    fn test_column_multiplicity() {
        let row = vec![tide(0, 4, None), tide(0, 4, None), tide(0, 4, None), tide(0, 5, None)];
        assert_eq!(column_multiplicity(&row), 3);
        assert_eq!(column_multiplicity(&[]), 1);
    }

    #[test]
    fn test_densify_tide_rows_uses_first_row_multiplicity() {
        let samples = vec![
            tide(0, 0, Some(1.0)),
            tide(0, 0, Some(0.5)),
            tide(0, 1, Some(2.0)),
            tide(0, 1, Some(3.0)),
            tide(1, 0, Some(0.7)),
            tide(1, 0, Some(0.9)),
        ];
        let rows = densify_tide_rows(&samples);
        assert_eq!(rows.len(), 2);
        let first: Vec<_> = rows[0].cells.iter().map(|t| t.depth).collect();
        assert_eq!(first, vec![Some(0.5), Some(2.0)]);
        assert_eq!(rows[1].cells.len(), 1);
        assert_eq!(rows[1].cells[0].depth, Some(0.7));
    }

    #[test]
    fn test_corrected_depth() {
        assert_eq!(corrected_depth(Some(-10.0), Some(1.0)), Some(-11.0));
        assert_eq!(corrected_depth(Some(-10.0), None), Some(-10.0));
        assert_eq!(corrected_depth(None, Some(1.0)), None);
    }

    #[test]
    fn test_combine_row_and_cell_ratios() {
        let config = PipelineConfig {
            depth_rows_per_tide_row: 2,
            depth_cells_per_tide_cell: 2,
            ..Default::default()
        };
        let depth_rows: Vec<_> = (0..3)
            .map(|m| depth_row(m, &[Some(-5.0), Some(-5.0), Some(-5.0), None, Some(-5.0)]))
            .collect();
        let tide_rows = vec![
            GridRow::new(0, vec![tide(0, 0, Some(1.0)), tide(0, 1, Some(2.0))]),
            GridRow::new(1, vec![tide(1, 0, None), tide(1, 1, Some(4.0)), tide(1, 2, Some(8.0))]),
        ];

        let combined = combine(&depth_rows, &tide_rows, &config);
        let values = |r: usize| -> Vec<Option<f64>> {
            combined[r].cells.iter().map(|s| s.depth).collect()
        };

        // rows 0 and 1 share tide row 0; the fifth cell has no third tide cell
        assert_eq!(values(0), vec![Some(-6.0), Some(-6.0), Some(-7.0), None, Some(-5.0)]);
        assert_eq!(values(1), values(0));
        // row 2 is a trailing partial group using tide row 1
        assert_eq!(values(2), vec![Some(-5.0), Some(-5.0), Some(-9.0), None, Some(-13.0)]);
    }

    #[test]
    fn test_combine_leaves_raw_rows_untouched() {
        let depth_rows = vec![depth_row(0, &[Some(-5.0)])];
        let tide_rows = vec![GridRow::new(0, vec![tide(0, 0, Some(1.0))])];

        let combined = combine(&depth_rows, &tide_rows, &PipelineConfig::default());
        assert_eq!(combined[0].cells[0].depth, Some(-6.0));
        assert_eq!(depth_rows[0].cells[0].depth, Some(-5.0));
    }

    #[test]
    fn test_combine_without_tide_rows_is_identity() {
        let depth_rows = vec![depth_row(0, &[Some(-5.0), None])];
        let combined = combine(&depth_rows, &[], &PipelineConfig::default());
        assert_eq!(combined, depth_rows);
    }
}

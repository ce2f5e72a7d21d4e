//! Grouping of row-major grid samples into rows.

use nogo_common::GridCell;

/// All samples of one grid row, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow<T> {
    pub m: i32,
    pub cells: Vec<T>,
}

impl<T> GridRow<T> {
    pub fn new(m: i32, cells: Vec<T>) -> Self {
        Self { m, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Split a row-major sample sequence into rows.
///
/// A new row starts whenever `m` increases. Samples arriving with a lower `m`
/// than the current row stay in the current row, so malformed ordering never
/// produces duplicate rows.
pub fn group_rows<T>(samples: impl IntoIterator<Item = T>) -> Vec<GridRow<T>>
where
    T: GridCell,
{
    let mut rows: Vec<GridRow<T>> = Vec::new();

    for sample in samples {
        match rows.last_mut() {
            Some(row) if sample.m() <= row.m => row.cells.push(sample),
            _ => rows.push(GridRow::new(sample.m(), vec![sample])),
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use nogo_common::DepthSample;

    fn cell(m: i32, n: i32) -> DepthSample {
        DepthSample::new(m, n, 0.0, 0.0, None)
    }

    #[test]
    fn test_group_rows_ascending() {
        let rows = group_rows(vec![cell(3, 0), cell(3, 1), cell(4, 0), cell(6, 0), cell(6, 1)]);
        let shape: Vec<_> = rows.iter().map(|r| (r.m, r.len())).collect();
        assert_eq!(shape, vec![(3, 2), (4, 1), (6, 2)]);
    }

    #[test]
    fn test_group_rows_empty() {
        let rows = group_rows(Vec::<DepthSample>::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_out_of_order_sample_stays_in_current_row() {
        let rows = group_rows(vec![cell(1, 0), cell(2, 0), cell(1, 1)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells.len(), 2);
    }
}

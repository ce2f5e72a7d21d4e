//! Row segmentation: split each filtered row into runs of consecutive cells.

use nogo_common::DepthSample;

use crate::rows::GridRow;

/// A maximal run of consecutive NoGo cells within one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A run of exactly one cell.
    Point(DepthSample),
    /// A run of two or more cells, ascending n.
    Line(Vec<DepthSample>),
}

impl Segment {
    fn from_run(mut run: Vec<DepthSample>) -> Option<Self> {
        match run.len() {
            0 => None,
            1 => run.pop().map(Segment::Point),
            _ => Some(Segment::Line(run)),
        }
    }

    pub fn cells(&self) -> &[DepthSample] {
        match self {
            Segment::Point(sample) => std::slice::from_ref(sample),
            Segment::Line(samples) => samples,
        }
    }

    pub fn first(&self) -> &DepthSample {
        &self.cells()[0]
    }

    pub fn last(&self) -> &DepthSample {
        let cells = self.cells();
        &cells[cells.len() - 1]
    }

    /// Column of the first cell.
    pub fn start(&self) -> i32 {
        self.first().n
    }

    /// Column of the last cell.
    pub fn end(&self) -> i32 {
        self.last().n
    }

    /// The cell at column `n`, if the segment spans it.
    pub fn cell_at(&self, n: i32) -> Option<&DepthSample> {
        let offset = n.checked_sub(self.start())?;
        usize::try_from(offset).ok().and_then(|i| self.cells().get(i))
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }
}

/// The segments of one row. Rows with no surviving cells carry no segments.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSection {
    pub m: i32,
    pub segments: Vec<Segment>,
}

impl RowSection {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split a row into segments wherever `n` does not follow the previous cell.
pub fn segment_row(cells: Vec<DepthSample>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run: Vec<DepthSample> = Vec::new();

    for cell in cells {
        if let Some(prev) = run.last() {
            if cell.n != prev.n + 1 {
                segments.extend(Segment::from_run(std::mem::take(&mut run)));
            }
        }
        run.push(cell);
    }
    segments.extend(Segment::from_run(run));

    segments
}

/// Segment every row, keeping empty rows as empty sections.
pub fn segment_rows(rows: Vec<GridRow<DepthSample>>) -> Vec<RowSection> {
    rows.into_iter()
        .map(|row| RowSection {
            m: row.m,
            segments: segment_row(row.cells),
        })
        .collect()
}

/// Row sections in the order the stitcher walks them: highest m first.
pub fn stitch_order(mut sections: Vec<RowSection>) -> Vec<RowSection> {
    sections.reverse();
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(m: i32, ns: &[i32]) -> Vec<DepthSample> {
        ns.iter()
            .map(|&n| DepthSample::new(m, n, 55.0, 11.0 + n as f64 * 0.001, Some(1.0)))
            .collect()
    }

    fn shape(segments: &[Segment]) -> Vec<(i32, i32, bool)> {
        segments.iter().map(|s| (s.start(), s.end(), s.is_line())).collect()
    }

    #[test]
    fn test_segment_row_splits_on_gaps() {
        let segments = segment_row(cells(0, &[1, 2, 3, 5, 7, 8]));
        assert_eq!(
            shape(&segments),
            vec![(1, 3, true), (5, 5, false), (7, 8, true)]
        );
    }

    #[test]
    fn test_segment_row_single_and_empty() {
        let segments = segment_row(cells(0, &[4]));
        assert!(matches!(segments[0], Segment::Point(_)));
        assert!(segment_row(Vec::new()).is_empty());
    }

    #[test]
    fn test_duplicate_column_breaks_run() {
        let segments = segment_row(cells(0, &[1, 2, 2, 3]));
        assert_eq!(shape(&segments), vec![(1, 2, true), (2, 3, true)]);
    }

    #[test]
    fn test_cell_at() {
        let segments = segment_row(cells(0, &[10, 11, 12]));
        let line = &segments[0];
        assert_eq!(line.cell_at(11).map(|c| c.n), Some(11));
        assert!(line.cell_at(9).is_none());
        assert!(line.cell_at(13).is_none());
    }

    #[test]
    fn test_segment_rows_and_stitch_order() {
        let rows = vec![
            GridRow::new(0, cells(0, &[1, 2])),
            GridRow::new(1, Vec::new()),
            GridRow::new(2, cells(2, &[3])),
        ];
        let sections = stitch_order(segment_rows(rows));
        let ms: Vec<_> = sections.iter().map(|s| s.m).collect();
        assert_eq!(ms, vec![2, 1, 0]);
        assert!(sections[1].is_empty());
    }
}

//! In-memory grid store backed by regular lattices.
//!
//! Used by tests and for local development from a JSON snapshot.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nogo_common::{
    DepthSample, GeoPoint, GridIndex, GridSpec, NogoError, NogoResult, RegionName, TideSample,
    TimeWindow,
};

use crate::store::{GridKind, GridStore};

/// Depth and tide data for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionGrid {
    pub depth_grid: GridSpec,
    /// Row-major depth values, one per depth grid cell.
    pub depths: Vec<Option<f64>>,
    #[serde(default)]
    pub tide_grid: Option<GridSpec>,
    #[serde(default)]
    pub tides: Vec<TideSample>,
}

impl RegionGrid {
    pub fn new(depth_grid: GridSpec, depths: Vec<Option<f64>>) -> NogoResult<Self> {
        let grid = Self {
            depth_grid,
            depths,
            tide_grid: None,
            tides: Vec::new(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Attach a tide lattice and its samples.
    pub fn with_tides(mut self, tide_grid: GridSpec, tides: Vec<TideSample>) -> Self {
        self.tide_grid = Some(tide_grid);
        self.tides = tides;
        self
    }

    pub fn depth_at(&self, index: GridIndex) -> Option<f64> {
        self.depth_grid
            .flat_index(index)
            .and_then(|i| self.depths.get(i).copied().flatten())
    }

    fn validate(&self) -> NogoResult<()> {
        if self.depths.len() != self.depth_grid.len() {
            return Err(NogoError::StoreError(format!(
                "depth grid has {} cells but {} values were supplied",
                self.depth_grid.len(),
                self.depths.len()
            )));
        }
        Ok(())
    }

    /// Clamp a corner pair to the depth lattice. `None` if they miss it entirely.
    fn clamp_span(grid: &GridSpec, a: GridIndex, b: GridIndex) -> Option<(GridIndex, GridIndex)> {
        if grid.is_empty() {
            return None;
        }
        let (lo, hi) = GridIndex::span(a, b);
        let max_m = grid.rows as i32 - 1;
        let max_n = grid.cols as i32 - 1;
        if hi.m < 0 || hi.n < 0 || lo.m > max_m || lo.n > max_n {
            return None;
        }
        Some((
            GridIndex::new(lo.m.max(0), lo.n.max(0)),
            GridIndex::new(hi.m.min(max_m), hi.n.min(max_n)),
        ))
    }
}

/// A grid store holding every region in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryGridStore {
    regions: HashMap<RegionName, RegionGrid>,
}

impl InMemoryGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, name: RegionName, grid: RegionGrid) -> Self {
        self.insert(name, grid);
        self
    }

    pub fn insert(&mut self, name: RegionName, grid: RegionGrid) {
        self.regions.insert(name, grid);
    }

    pub fn region(&self, name: RegionName) -> Option<&RegionGrid> {
        self.regions.get(&name)
    }

    /// Parse a JSON snapshot.
    pub fn from_json_str(content: &str) -> NogoResult<Self> {
        let store: InMemoryGridStore = serde_json::from_str(content)?;
        for grid in store.regions.values() {
            grid.validate()?;
        }
        Ok(store)
    }

    /// Load a JSON snapshot from disk.
    pub fn load_snapshot(path: impl AsRef<Path>) -> NogoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NogoError::StoreError(format!("Failed to read snapshot {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }
}

#[async_trait]
impl GridStore for InMemoryGridStore {
    async fn locate(
        &self,
        region: RegionName,
        kind: GridKind,
        point: GeoPoint,
    ) -> NogoResult<Option<GridIndex>> {
        let Some(grid) = self.regions.get(&region) else {
            return Ok(None);
        };

        let index = match kind {
            GridKind::Depth => grid.depth_grid.locate(&point),
            GridKind::Tide => grid.tide_grid.as_ref().and_then(|g| g.locate(&point)),
        };

        debug!(region = %region, kind = %kind, ?point, ?index, "Located grid point");
        Ok(index)
    }

    async fn fetch_depth(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
    ) -> NogoResult<Vec<DepthSample>> {
        let Some(grid) = self.regions.get(&region) else {
            return Ok(Vec::new());
        };
        let Some((lo, hi)) = RegionGrid::clamp_span(&grid.depth_grid, first, second) else {
            return Ok(Vec::new());
        };

        let mut samples =
            Vec::with_capacity(((hi.m - lo.m + 1) * (hi.n - lo.n + 1)).max(0) as usize);
        for m in lo.m..=hi.m {
            for n in lo.n..=hi.n {
                let index = GridIndex::new(m, n);
                let Some(position) = grid.depth_grid.index_to_point(index) else {
                    continue;
                };
                samples.push(DepthSample::new(
                    m,
                    n,
                    position.lat,
                    position.lon,
                    grid.depth_at(index),
                ));
            }
        }

        Ok(samples)
    }

    async fn fetch_tide(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
        window: TimeWindow,
    ) -> NogoResult<Option<Vec<TideSample>>> {
        let Some(grid) = self.regions.get(&region) else {
            return Ok(None);
        };
        if grid.tide_grid.is_none() {
            return Ok(None);
        }

        let (lo, hi) = GridIndex::span(first, second);
        let mut samples: Vec<TideSample> = grid
            .tides
            .iter()
            .filter(|t| GridIndex::new(t.m, t.n).within(&lo, &hi) && window.contains(&t.time))
            .cloned()
            .collect();
        samples.sort_by(|a, b| (a.m, a.n, a.time).cmp(&(b.m, b.n, b.time)));

        Ok(Some(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn store() -> InMemoryGridStore {
        let spec = GridSpec::new(3, 4, GeoPoint::new(55.5, 11.0), -0.001, 0.001);
        let depths = (0..12).map(|i| if i == 5 { None } else { Some(-(i as f64)) }).collect();
        let grid = RegionGrid::new(spec, depths).unwrap();
        InMemoryGridStore::new().with_region(RegionName::Sydkattegat, grid)
    }

    #[tokio::test]
    async fn test_locate_depth_and_missing_tide() {
        let store = store();
        let point = GeoPoint::new(55.499, 11.002);
        let depth = store
            .locate(RegionName::Sydkattegat, GridKind::Depth, point)
            .await
            .unwrap();
        assert_eq!(depth, Some(GridIndex::new(1, 2)));

        let tide = store
            .locate(RegionName::Sydkattegat, GridKind::Tide, point)
            .await
            .unwrap();
        assert_eq!(tide, None);
    }

    #[tokio::test]
    async fn test_fetch_depth_row_major_any_corner_order() {
        let store = store();
        let samples = store
            .fetch_depth(RegionName::Sydkattegat, GridIndex::new(2, 2), GridIndex::new(1, 1))
            .await
            .unwrap();
        let cells: Vec<_> = samples.iter().map(|s| (s.m, s.n)).collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        // flat index 5 is (1, 1)
        assert_eq!(samples[0].depth, None);
        assert_eq!(samples[1].depth, Some(-6.0));
    }

    #[tokio::test]
    async fn test_fetch_tide_none_without_tide_grid() {
        let store = store();
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 3, 0, 0).unwrap(),
        );
        let tide = store
            .fetch_tide(RegionName::Sydkattegat, GridIndex::new(0, 0), GridIndex::new(2, 3), window)
            .await
            .unwrap();
        assert!(tide.is_none());
    }

    #[test]
    fn test_depth_length_mismatch_rejected() {
        let spec = GridSpec::new(2, 2, GeoPoint::new(55.0, 11.0), -0.001, 0.001);
        assert!(RegionGrid::new(spec, vec![Some(1.0)]).is_err());
    }
}

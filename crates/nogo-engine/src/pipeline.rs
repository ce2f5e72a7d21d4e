//! The NoGo request pipeline.
//!
//! ```text
//! NogoRequest
//!      │
//!      ├─► RegionTable::resolve ──► miss: error 17, no polygons
//!      │
//!      ├─► locate ×4 (depth/tide × NW/SE), joined ──► depth miss: empty, code 0
//!      │
//!      ├─► fetch depth ‖ fetch tide, joined ──► no tide: code 18
//!      │
//!      └─► build_polygons
//!            combine → filter → segment → stitch → resolve overlaps → emit
//! ```
//!
//! Every stage after the fetch join runs on the calling task. All state is
//! local to a single `poll` call.

use std::future::Future;
use std::sync::Arc;

use futures::future::try_join_all;
use grid_store::{GridKind, GridStore};
use nogo_common::{
    DepthSample, ErrorCode, GeoPoint, GridIndex, NogoPolygon, NogoRequest, NogoResponse,
    NogoResult, Region, RegionName, RegionTable, TideSample, TimeWindow,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::combiner::tide_correct;
use crate::config::PipelineConfig;
use crate::emitter::emit;
use crate::error::{EngineError, Result};
use crate::filter::DraughtFilter;
use crate::overlap::resolve_overlaps;
use crate::rows::group_rows;
use crate::segment::{segment_rows, stitch_order};
use crate::stitch::stitch;

/// Grid corners for both lattices. Tide corners are present only when both
/// request corners fall inside the tide grid.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LocatedCorners {
    depth: Option<(GridIndex, GridIndex)>,
    tide: Option<(GridIndex, GridIndex)>,
}

/// Computes NoGo polygons for requests against a grid store.
#[derive(Clone)]
pub struct NogoPipeline {
    store: Arc<dyn GridStore>,
    regions: Arc<RegionTable>,
    config: PipelineConfig,
}

impl NogoPipeline {
    pub fn new(
        store: Arc<dyn GridStore>,
        regions: Arc<RegionTable>,
        config: PipelineConfig,
    ) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        Ok(Self {
            store,
            regions,
            config,
        })
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn GridStore> {
        &self.store
    }

    /// Run one request through the pipeline.
    ///
    /// Recoverable conditions (no region, no coverage, no tide) are reported
    /// through the response code. Store failures and failed tasks abort the
    /// request with no polygons.
    #[instrument(skip_all, fields(draught = request.draught, region = tracing::field::Empty))]
    pub async fn poll(&self, request: &NogoRequest) -> Result<NogoResponse> {
        let Some(region) = self.regions.resolve(&request.north_west, &request.south_east) else {
            info!(
                nw_lat = request.north_west.lat,
                nw_lon = request.north_west.lon,
                se_lat = request.south_east.lat,
                se_lon = request.south_east.lon,
                "Bounding box outside every configured region"
            );
            return Ok(NogoResponse::no_data_for_area());
        };
        tracing::Span::current().record("region", region.name.as_str());

        let window = request.window().truncated_to_hour();

        let corners = self
            .locate_corners(region.name, request.north_west, request.south_east)
            .await?;

        let Some((depth_nw, depth_se)) = corners.depth else {
            info!("No depth coverage for bounding box");
            return Ok(NogoResponse::empty(window));
        };

        let (depth, tide) = self
            .fetch_grids(region.name, (depth_nw, depth_se), corners.tide, window)
            .await?;

        let tide = match tide {
            Some(samples) if !samples.is_empty() => Some(samples),
            _ => None,
        };
        let code = if tide.is_some() {
            ErrorCode::Success
        } else {
            warn!("Tide data unavailable, using depth only");
            ErrorCode::TideUnavailable
        };

        if depth.is_empty() {
            info!("Depth fetch returned no samples");
            return Ok(NogoResponse::computed(code, window, Vec::new()));
        }

        let polygons = self.build_polygons(region, request.draught, depth, tide.as_deref());

        info!(
            code = code.code(),
            polygons = polygons.len(),
            "NoGo request complete"
        );

        Ok(NogoResponse::computed(code, window, polygons))
    }

    /// Turn fetched samples into NoGo polygons.
    ///
    /// Tide correction is applied only when enabled and tide samples are given.
    pub fn build_polygons(
        &self,
        region: &Region,
        draught: f64,
        depth: Vec<DepthSample>,
        tide: Option<&[TideSample]>,
    ) -> Vec<NogoPolygon> {
        let raw_rows = group_rows(depth);

        let rows = match tide {
            Some(tide) if self.config.tide_correction => tide_correct(&raw_rows, tide, &self.config),
            _ => raw_rows,
        };

        let filter = DraughtFilter::new(draught, self.config.unknown_depth);
        let filtered = filter.apply(rows);
        let candidates: usize = filtered.iter().map(|row| row.len()).sum();

        let sections = stitch_order(segment_rows(filtered));
        let bridges = stitch(&sections);
        let bridge_count = bridges.len();

        let bridges = if region.resolve_overlaps {
            resolve_overlaps(bridges)
        } else {
            bridges
        };

        debug!(
            region = %region.name,
            rows = sections.len(),
            candidates,
            bridges = bridge_count,
            kept_bridges = bridges.len(),
            "Stitched NoGo rows"
        );

        emit(region, bridges, &sections)
    }

    /// Locate both request corners on both lattices concurrently.
    async fn locate_corners(
        &self,
        region: RegionName,
        north_west: GeoPoint,
        south_east: GeoPoint,
    ) -> Result<LocatedCorners> {
        let lookups = [
            (GridKind::Depth, north_west),
            (GridKind::Depth, south_east),
            (GridKind::Tide, north_west),
            (GridKind::Tide, south_east),
        ];
        let located = try_join_all(
            lookups
                .into_iter()
                .map(|(kind, point)| self.spawn_locate(region, kind, point).join()),
        )
        .await?;
        let (depth_nw, depth_se, tide_nw, tide_se) = (located[0], located[1], located[2], located[3]);

        debug!(
            ?depth_nw,
            ?depth_se,
            ?tide_nw,
            ?tide_se,
            "Located request corners"
        );

        Ok(LocatedCorners {
            depth: depth_nw.zip(depth_se),
            tide: tide_nw.zip(tide_se),
        })
    }

    /// Fetch depth and tide samples concurrently.
    ///
    /// Without tide corners the tide fetch is skipped and reported as absent.
    async fn fetch_grids(
        &self,
        region: RegionName,
        depth_corners: (GridIndex, GridIndex),
        tide_corners: Option<(GridIndex, GridIndex)>,
        window: TimeWindow,
    ) -> Result<(Vec<DepthSample>, Option<Vec<TideSample>>)> {
        let store = Arc::clone(&self.store);
        let (first, second) = depth_corners;
        let depth = StoreTask::spawn("fetch_depth", async move {
            store.fetch_depth(region, first, second).await
        });

        let store = Arc::clone(&self.store);
        let tide = StoreTask::spawn("fetch_tide", async move {
            match tide_corners {
                Some((first, second)) => store.fetch_tide(region, first, second, window).await,
                None => Ok(None),
            }
        });

        let (depth, tide) = tokio::try_join!(depth.join(), tide.join())?;

        debug!(
            depth_samples = depth.len(),
            tide_samples = tide.as_ref().map(|t| t.len()),
            "Fetched grids"
        );

        Ok((depth, tide))
    }

    fn spawn_locate(
        &self,
        region: RegionName,
        kind: GridKind,
        point: GeoPoint,
    ) -> StoreTask<Option<GridIndex>> {
        let store = Arc::clone(&self.store);
        StoreTask::spawn("locate", async move { store.locate(region, kind, point).await })
    }
}

/// A store call running on its own task. Dropping it before completion
/// aborts the task.
struct StoreTask<T> {
    stage: &'static str,
    handle: JoinHandle<NogoResult<T>>,
}

impl<T: Send + 'static> StoreTask<T> {
    fn spawn<F>(stage: &'static str, call: F) -> Self
    where
        F: Future<Output = NogoResult<T>> + Send + 'static,
    {
        Self {
            stage,
            handle: tokio::spawn(call),
        }
    }

    /// Await the call, flattening join and store failures.
    async fn join(mut self) -> Result<T> {
        match (&mut self.handle).await {
            Ok(result) => result.map_err(|e| EngineError::store(self.stage, e)),
            Err(e) => Err(EngineError::task_failed(self.stage, e.to_string())),
        }
    }
}

impl<T> Drop for StoreTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

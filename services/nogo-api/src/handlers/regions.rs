//! Region table handler.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use nogo_common::RegionTable;

use crate::state::AppState;

/// GET /regions - The active region table, in priority order.
pub async fn regions_handler(Extension(state): Extension<Arc<AppState>>) -> Json<RegionTable> {
    Json(state.pipeline.regions().clone())
}

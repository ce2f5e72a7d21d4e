//! Application state for the NoGo API.

use std::sync::Arc;

use anyhow::{Context, Result};
use grid_store::GridStore;
use nogo_engine::NogoPipeline;

use crate::config::ServiceConfig;

/// Shared application state.
pub struct AppState {
    /// The NoGo pipeline, holding the store and region table.
    pub pipeline: NogoPipeline,

    /// Name of the grid store backend, reported by the readiness check.
    pub store_backend: String,
}

impl AppState {
    /// Create application state from loaded configuration and a connected store.
    pub fn new(
        config: &ServiceConfig,
        store: Arc<dyn GridStore>,
        store_backend: impl Into<String>,
    ) -> Result<Self> {
        let regions = Arc::new(config.region_table()?);
        let pipeline = NogoPipeline::new(store, regions, config.pipeline.clone())
            .context("Failed to build NoGo pipeline")?;

        Ok(Self {
            pipeline,
            store_backend: store_backend.into(),
        })
    }
}

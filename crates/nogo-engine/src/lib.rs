//! NoGo polygon pipeline.
//!
//! Given a bounding box, a vessel draught and a time window, this crate finds
//! the parts of a region's depth grid that are too shallow to enter and covers
//! them with polygons.
//!
//! # Architecture
//!
//! ```text
//! NogoPipeline::poll(request)
//!      │
//!      ├─► Region lookup (data-driven table, first match wins)
//!      │
//!      ├─► Fork/join: locate 4 corners, then fetch depth + tide
//!      │
//!      ├─► combiner   tide-corrected copy of the depth rows
//!      ├─► filter     keep cells shallower than the draught
//!      ├─► segment    runs of consecutive cells per row
//!      ├─► stitch     bridge polygons between neighbouring rows
//!      ├─► overlap    drop overlapping bridges (per-region policy)
//!      └─► emitter    padded quads for runs, merged with bridges
//! ```
//!
//! # Example
//!
//! ```ignore
//! use nogo_engine::{NogoPipeline, PipelineConfig};
//!
//! let pipeline = NogoPipeline::new(store, Arc::new(RegionTable::builtin()), PipelineConfig::from_env())?;
//! let response = pipeline.poll(&request).await?;
//! ```

pub mod combiner;
pub mod config;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod overlap;
pub mod pipeline;
pub mod rows;
pub mod segment;
pub mod stitch;

pub use config::{PipelineConfig, UnknownDepthPolicy};
pub use error::{EngineError, Result};
pub use filter::DraughtFilter;
pub use pipeline::NogoPipeline;
pub use rows::{group_rows, GridRow};
pub use segment::{RowSection, Segment};

//! Common types shared across the NoGo workspace.

pub mod error;
pub mod geo;
pub mod grid;
pub mod polygon;
pub mod region;
pub mod request;
pub mod response;
pub mod time;

pub use error::{NogoError, NogoResult};
pub use geo::{GeoPoint, LatLonRect};
pub use grid::{DepthSample, GridCell, GridIndex, GridSpec, TideSample};
pub use polygon::{NogoPoint, NogoPolygon};
pub use region::{Region, RegionName, RegionTable};
pub use request::NogoRequest;
pub use response::{ErrorCode, NogoResponse};
pub use time::{truncate_to_hour, TimeWindow};

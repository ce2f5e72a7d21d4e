//! Grid store abstractions for the NoGo services.
//!
//! Provides the [`GridStore`] seam the pipeline consumes, with:
//! - An in-memory store for tests and development snapshots
//! - A PostgreSQL store for production grid data

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{InMemoryGridStore, RegionGrid};
pub use postgres::{PgGridStore, PgGridStoreConfig};
pub use store::{GridKind, GridStore};

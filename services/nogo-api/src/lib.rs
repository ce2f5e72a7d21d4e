//! NoGo API Service Library
//!
//! HTTP transport for the NoGo polygon pipeline: JSON requests in, JSON
//! polygon sets out.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod state;

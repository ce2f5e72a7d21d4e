//! HTTP request handlers for the NoGo API.

pub mod health;
pub mod nogo;
pub mod regions;

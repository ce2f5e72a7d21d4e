//! Error types for the NoGo services.

use thiserror::Error;

/// Result type alias using NogoError.
pub type NogoResult<T> = Result<T, NogoError>;

/// Primary error type for NoGo operations.
///
/// Conditions with a defined fallback (no region, no grid coverage, no tide)
/// are not errors; they are reported through [`crate::ErrorCode`] on the
/// response. Only the failures below ever reach the transport layer.
#[derive(Debug, Error)]
pub enum NogoError {
    // === Request Errors ===
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // === Configuration Errors ===
    #[error("Invalid region table: {0}")]
    InvalidRegionTable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // === Store Errors ===
    #[error("Grid store error: {0}")]
    StoreError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl NogoError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            NogoError::InvalidRequest(_) => 400,

            NogoError::StoreError(_)
            | NogoError::DatabaseError(_)
            | NogoError::ServiceUnavailable(_) => 503,

            _ => 500,
        }
    }

    /// Short machine-readable kind, used as a metrics label and in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            NogoError::InvalidRequest(_) => "invalid_request",
            NogoError::InvalidRegionTable(_) => "invalid_region_table",
            NogoError::ConfigError(_) => "config",
            NogoError::StoreError(_) => "store",
            NogoError::DatabaseError(_) => "database",
            NogoError::TaskFailed(_) => "task_failed",
            NogoError::InternalError(_) => "internal",
            NogoError::ServiceUnavailable(_) => "unavailable",
        }
    }
}

impl From<std::io::Error> for NogoError {
    fn from(err: std::io::Error) -> Self {
        NogoError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for NogoError {
    fn from(err: serde_json::Error) -> Self {
        NogoError::InternalError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for NogoError {
    fn from(err: serde_yaml::Error) -> Self {
        NogoError::ConfigError(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NogoError::InvalidRequest("x".into()).http_status_code(), 400);
        assert_eq!(NogoError::StoreError("x".into()).http_status_code(), 503);
        assert_eq!(NogoError::TaskFailed("x".into()).http_status_code(), 500);
    }
}

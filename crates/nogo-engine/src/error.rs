//! Error types for the NoGo pipeline.

use nogo_common::NogoError;
use thiserror::Error;

/// Errors that abort a NoGo request.
///
/// Anything recoverable (no region, no coverage, no tide) is reported on the
/// response instead; reaching one of these means no polygons are returned.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The grid store failed a lookup or fetch.
    #[error("grid store failure during {stage}: {source}")]
    Store {
        stage: &'static str,
        #[source]
        source: NogoError,
    },

    /// A fork/join task panicked or was cancelled.
    #[error("task failed during {stage}: {message}")]
    TaskFailed {
        stage: &'static str,
        message: String,
    },

    /// The pipeline configuration is unusable.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub fn store(stage: &'static str, source: NogoError) -> Self {
        Self::Store { stage, source }
    }

    pub fn task_failed(stage: &'static str, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            stage,
            message: message.into(),
        }
    }
}

impl From<EngineError> for NogoError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Store { source, .. } => source,
            EngineError::TaskFailed { stage, message } => {
                NogoError::TaskFailed(format!("{}: {}", stage, message))
            }
            EngineError::InvalidConfig(msg) => NogoError::ConfigError(msg),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, EngineError>;

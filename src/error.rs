//! Error types for configuration, result sinks, and whole runs.

use thiserror::Error;

/// Problems with the run configuration. Raised before any step is computed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("time_end must be non-negative, got {0}")]
    NegativeTimeEnd(i64),
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("cell buffer holds {actual} values, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures reported by a [`ResultSink`](crate::sink::ResultSink).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("sink transaction out of order: {0}")]
    Protocol(&'static str),
    #[error("sink backend error: {0}")]
    Backend(String),
}

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("result sink failed: {0}")]
    Sink(#[from] SinkError),
}

impl RunError {
    /// True when the caller should fix its input rather than retry persistence.
    pub fn is_config(&self) -> bool {
        matches!(self, RunError::Config(_))
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, RunError::Sink(_))
    }
}

//! Search error types.

/// Error type for process spawning operations.
#[derive(thiserror::Error, Debug)]
pub enum SpawnError {
    /// The search binary was not found.
    #[error("Search binary not found: {0}")]
    NotFound(String),
    /// Permission denied when spawning.
    #[error("Permission denied running {0}")]
    PermissionDenied(String),
    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpawnError {
    /// Create a `SpawnError` from an I/O error, classifying common cases.
    #[must_use]
    pub fn from_io(program: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(program.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(program.to_string()),
            _ => Self::Io(err),
        }
    }
}

/// Errors surfaced to the caller of a search.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// The request was rejected before anything was spawned.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The search process could not be launched.
    #[error("Failed to start search: {0}")]
    Spawn(#[from] SpawnError),

    /// The process was launched without a readable stdout.
    #[error("Search process stdout not available")]
    NoStdout,

    /// The process exited before it could be registered.
    #[error("Search process exited before registration")]
    ProcessGone,
}

impl SearchError {
    /// Whether the error was caused by the request rather than the host.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

/// Errors reported by a chunk sink.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The receiving side has gone away.
    #[error("Response sink closed")]
    Closed,
}

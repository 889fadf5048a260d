//! Error types for the logger registry

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unresolvable severity name. Fatal at configuration time: a logger
    /// must never run with an ambiguous threshold.
    #[error("unknown log level '{name}'")]
    UnknownLevel { name: String },

    /// Unresolvable formatter name. Fatal at configuration time.
    #[error("unknown formatter '{name}'")]
    UnknownFormatter { name: String },

    /// Invalid logger configuration with details
    #[error("invalid configuration for logger '{logger}': {message}")]
    InvalidConfiguration { logger: String, message: String },

    /// File sink error with path
    #[error("file sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File rotation error
    #[error("file rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unknown-level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create an unknown-formatter error
    pub fn unknown_formatter(name: impl Into<String>) -> Self {
        LoggerError::UnknownFormatter { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(logger: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            logger: logger.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

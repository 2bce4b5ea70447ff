//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Configuration failures that chaining methods recover from locally
///
/// These are the only faults a chaining call can hit. They never reach the
/// caller of a chaining method; they are handed to the logger's diagnostics
/// and the affected field keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Directory path cannot be used for log output
    #[error("Invalid log path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Level name does not resolve to a known level
    #[error("Invalid log level: '{name}'")]
    InvalidLevel { name: String },
}

impl ConfigError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        ConfigError::InvalidLevel { name: name.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration rejected by an explicit setter
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Async worker did not acknowledge a flush in time
    #[error("Timed out waiting for async log worker to flush")]
    FlushTimeout,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ConfigError::invalid_path("/tmp/a\0b", "contains NUL byte");
        assert!(matches!(err, ConfigError::InvalidPath { .. }));

        let err: LoggerError = ConfigError::invalid_level("LOUD").into();
        assert!(matches!(err, LoggerError::Config(ConfigError::InvalidLevel { .. })));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::invalid_path("/var/log/app.log", "not a directory");
        assert_eq!(
            err.to_string(),
            "Invalid log path '/var/log/app.log': not a directory"
        );

        let err = LoggerError::from(ConfigError::invalid_level("LOUD"));
        assert_eq!(err.to_string(), "Invalid log level: 'LOUD'");

        assert_eq!(
            LoggerError::FlushTimeout.to_string(),
            "Timed out waiting for async log worker to flush"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}

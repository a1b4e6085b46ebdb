//! Error types for suitstore.
//!
//! This module defines the error types shared by the record store, the
//! snapshot layer, configuration loading, and the `suitctl` front end.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for suitstore operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// A record was submitted with an empty or whitespace-only identifier.
    #[error("record identifier must not be blank")]
    BlankIdentifier,

    /// A record with the same identifier (ignoring case) is already stored.
    #[error("a suit with identifier '{id}' already exists")]
    DuplicateIdentifier {
        /// The identifier that collided.
        id: String,
    },

    /// No stored record matches the identifier.
    #[error("no suit with identifier '{id}'")]
    RecordNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    // === Snapshot Errors ===
    /// The snapshot file does not have the expected top-level shape.
    #[error("unrecognized snapshot format: {message}")]
    SnapshotFormat {
        /// Description of what was wrong.
        message: String,
    },

    /// No snapshot could be read at the given path.
    #[error("no readable snapshot at {path}")]
    SnapshotUnavailable {
        /// The path that was tried.
        path: PathBuf,
    },

    /// Writing a snapshot failed.
    #[error("failed to save snapshot to {path}: {reason}")]
    SaveFailed {
        /// The path that was attempted.
        path: PathBuf,
        /// Why the write failed.
        reason: String,
    },

    /// The working snapshot exists but could not be read at startup, so it
    /// is not replaced.
    #[error("refusing to overwrite unreadable snapshot at {path}")]
    OverwriteRefused {
        /// The working snapshot path.
        path: PathBuf,
    },

    // === Input Errors ===
    /// A date entered by the user is not a calendar date.
    #[error("invalid inspection date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// Some other user input was missing or unusable.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for suitstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a record-not-found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Create a duplicate-identifier error.
    #[must_use]
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier { id: id.into() }
    }

    /// Create a snapshot format error.
    #[must_use]
    pub fn snapshot_format(message: impl Into<String>) -> Self {
        Self::SnapshotFormat {
            message: message.into(),
        }
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this error means the identifier matched nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error is a record-store validation rejection.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::BlankIdentifier | Self::DuplicateIdentifier { .. } | Self::RecordNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::BlankIdentifier.to_string(),
            "record identifier must not be blank"
        );

        let err = Error::not_found("T-01");
        assert_eq!(err.to_string(), "no suit with identifier 'T-01'");
    }

    #[test]
    fn test_duplicate_error_display() {
        let err = Error::duplicate("t-01");
        assert!(err.to_string().contains("'t-01'"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::BlankIdentifier.is_not_found());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::BlankIdentifier.is_validation_error());
        assert!(Error::duplicate("a").is_validation_error());
        assert!(Error::not_found("a").is_validation_error());
        assert!(!Error::snapshot_format("bad").is_validation_error());
    }

    #[test]
    fn test_snapshot_format_error_display() {
        let err = Error::snapshot_format("records is not an array");
        assert_eq!(
            err.to_string(),
            "unrecognized snapshot format: records is not an array"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let err = Error::InvalidDate {
            input: "10/01/2025".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("10/01/2025"));
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_snapshot_path_errors_display() {
        let err = Error::SnapshotUnavailable {
            path: PathBuf::from("/tmp/suits.dat"),
        };
        assert!(err.to_string().contains("/tmp/suits.dat"));

        let err = Error::SaveFailed {
            path: PathBuf::from("/ro/suits.dat"),
            reason: "read-only file system".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/ro/suits.dat"));
        assert!(msg.contains("read-only"));

        let err = Error::OverwriteRefused {
            path: PathBuf::from("suits.dat"),
        };
        assert!(err.to_string().starts_with("refusing to overwrite"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("size is required");
        assert_eq!(err.to_string(), "invalid input: size is required");
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "file_name must be a bare file name".to_string(),
        };
        assert!(err.to_string().contains("bare file name"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}

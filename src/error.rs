//! Centralized error handling for Graphite
//!
//! This module provides a unified error type that covers file I/O and
//! configuration failures. Content-level problems (a malformed preview
//! document, an unmatched construct during highlighting) are deliberately
//! *not* represented here: the preview renderer reports those through
//! `RenderOutcome::Unavailable` and the highlighter degrades to plain spans,
//! so they never surface as crate errors.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read file contents
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to write file contents
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } => Some(source),
            Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_creation() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_file_read_error() {
        let path = PathBuf::from("/test/file.md");
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read failed");
        let err = Error::FileRead {
            path: path.clone(),
            source: io_err,
        };
        assert!(matches!(err, Error::FileRead { path: p, .. } if p == path));
    }

    #[test]
    fn test_file_write_error_display() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        let err = Error::FileWrite {
            path: PathBuf::from("/test/out.xml"),
            source: io_err,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Failed to write"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        let msg = format!("{}", err);
        assert_eq!(msg, "Configuration directory not found");
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error as StdError;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err = Error::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        let err = Error::ConfigDirNotFound;
        assert!(err.source().is_none());
    }

    #[test]
    fn test_read_and_write_are_distinct_kinds() {
        // Callers distinguish load failures from save failures when reporting
        let read = Error::FileRead {
            path: PathBuf::from("a"),
            source: io::Error::new(io::ErrorKind::NotFound, "x"),
        };
        let write = Error::FileWrite {
            path: PathBuf::from("a"),
            source: io::Error::new(io::ErrorKind::NotFound, "x"),
        };
        assert!(matches!(read, Error::FileRead { .. }));
        assert!(matches!(write, Error::FileWrite { .. }));
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        use super::ResultExt;
        let result: super::Result<i32> = Ok(42);
        let value = result.unwrap_or_warn_default(0, "test context");
        assert_eq!(value, 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        use super::ResultExt;
        let result: super::Result<i32> = Err(Error::ConfigDirNotFound);
        let value = result.unwrap_or_warn_default(0, "test context");
        assert_eq!(value, 0);
    }
}

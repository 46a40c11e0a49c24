//! Error types and handling infrastructure for universal-input.
//!
//! The control core never fails: invalid masks, missing formatters and contradictory
//! configuration all degrade to a defined fallback. Errors only exist at the edges that
//! touch the outside world, namely loading form definitions and parsing event scripts.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should point at the file or line at fault
//! - **Context preservation**: Keep the underlying I/O or parse error as the source
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for universal-input operations.
#[derive(Error, Debug)]
pub enum UniversalInputError {
    /// Reading a form definition or script failed
    #[error("I/O operation failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A form definition file could not be found
    #[error("Form definition not found: {path}")]
    FormNotFound { path: PathBuf },

    /// A form definition did not parse or violated a form rule
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// An event script line could not be parsed
    #[error("Script error on line {line}: {message}")]
    ScriptError { line: usize, message: String },

    /// A script or hub message referenced a field the form does not have
    #[error("Unknown field: {key}")]
    UnknownField { key: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for universal-input operations.
pub type Result<T> = std::result::Result<T, UniversalInputError>;

impl UniversalInputError {
    /// Create an Io error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a ScriptError for a 1-based line number
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::ScriptError {
            line,
            message: message.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(key: impl Into<String>) -> Self {
        Self::UnknownField { key: key.into() }
    }
}

impl From<std::io::Error> for UniversalInputError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::Io {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::Io {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::Io {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let not_found = UniversalInputError::FormNotFound {
            path: PathBuf::from("/etc/form.toml"),
        };
        assert_eq!(
            not_found.to_string(),
            "Form definition not found: /etc/form.toml"
        );

        let script = UniversalInputError::script(3, "unknown command `jump`");
        assert_eq!(
            script.to_string(),
            "Script error on line 3: unknown command `jump`"
        );

        let field = UniversalInputError::unknown_field("phone");
        assert_eq!(field.to_string(), "Unknown field: phone");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: UniversalInputError = io_err.into();

        match err {
            UniversalInputError::Io { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            other => panic!("Expected Io variant, got {other:?}"),
        }
    }
}

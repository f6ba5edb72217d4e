//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Book catalog could not be built or loaded
    #[error("Catalog error in {path:?}: {message}")]
    Catalog {
        /// Description of the catalog problem.
        message: String,
        /// Catalog file, or `None` for the built-in table.
        path: Option<PathBuf>,
    },

    /// Book name not present in the catalog
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// A layout input is outside its accepted range or unparsable
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidParameter {
        /// Human-readable field name.
        field: &'static str,
        /// The rejected value as entered.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A column holds no characters, so no column count exists
    #[error(
        "Column capacity is zero ({lines_per_column} lines x {characters_per_line} characters per line)"
    )]
    ZeroCapacity {
        /// Lines per column as supplied.
        lines_per_column: u32,
        /// Characters per line as supplied.
        characters_per_line: u32,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a catalog error with file context
    pub fn catalog(message: impl Into<String>, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Catalog { message: message.into(), path: path.into() }
    }

    /// Create an invalid-parameter error for a named field
    pub fn invalid_parameter(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn invalid_parameter_names_field_and_value() {
        let err = Error::invalid_parameter("Column Width (cm)", 0.05, "must be at least 0.1");
        assert_eq!(
            err.to_string(),
            "Invalid Column Width (cm) '0.05': must be at least 0.1"
        );
    }

    #[test]
    fn zero_capacity_mentions_both_factors() {
        let err = Error::ZeroCapacity { lines_per_column: 0, characters_per_line: 30 };
        let msg = err.to_string();
        assert!(msg.contains("0 lines"));
        assert!(msg.contains("30 characters"));
    }

    #[test]
    fn config_error_appends_hint() {
        let err = Error::config("MANUSCRIPT_COLUMN_WIDTH_CM is not a number", "Use a decimal such as 10.0");
        assert!(err.to_string().ends_with("Use a decimal such as 10.0"));
    }

    #[test]
    fn serializer_failures_convert_to_json_variant() {
        fn parse(raw: &str) -> Result<u32> {
            Ok(serde_json::from_str(raw)?)
        }
        let err = parse("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got {err:?}");
        assert!(err.to_string().starts_with("JSON error"));
    }
}

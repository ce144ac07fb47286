//! Error types for Mongo Schemist
//!
//! Schema inference itself never fails: unrecognized values resolve to the
//! `Unknown` type. Everything in here comes from the edges of the crate,
//! i.e. the document sources, configuration and output.

use thiserror::Error;

/// The main error type for Mongo Schemist
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Document Source Errors
    // ============================================================================
    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("MongoDB driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Whether the error was raised while talking to the database
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::Driver(_))
    }
}

/// Result type alias for Mongo Schemist
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::connection("no route to host");
        assert_eq!(err.to_string(), "Connection failed: no route to host");

        let err = Error::missing_field("database");
        assert_eq!(err.to_string(), "Missing required config field: database");

        let err = Error::malformed("element 3 is not a document");
        assert_eq!(
            err.to_string(),
            "Malformed input: element 3 is not a document"
        );
    }

    #[test]
    fn test_is_source_failure() {
        assert!(Error::connection("refused").is_source_failure());
        assert!(!Error::config("bad depth").is_source_failure());
        assert!(!Error::malformed("not a document").is_source_failure());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let err = result.context("outer").unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "outer: Configuration error: inner");
    }

    #[test]
    fn test_result_with_context_is_lazy() {
        let ok: Result<u8> = Ok(1);
        let value = ok
            .with_context(|| panic!("context built for a success"))
            .unwrap();
        assert_eq!(value, 1);
    }
}

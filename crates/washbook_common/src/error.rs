use std::fmt;
use thiserror::Error;

/// The base error type shared by all Washbook crates.
///
/// Domain crates convert their own errors into this type at the HTTP edge
/// (see [`crate::http`]).
#[derive(Error, Debug)]
pub enum WashbookError {
    /// Request data is missing or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A request body or query string could not be decoded
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for WashbookError {
    fn status_code(&self) -> u16 {
        match self {
            WashbookError::ValidationError(_) => 400,
            WashbookError::ParseError(_) => 400,
            WashbookError::ConfigError(_) => 500,
            WashbookError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, WashbookError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, WashbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, WashbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| WashbookError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, WashbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| WashbookError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> WashbookError {
    WashbookError::ConfigError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let missing = WashbookError::ValidationError("missing name".to_string());
        assert_eq!(missing.status_code(), 400);
        let unreadable = WashbookError::ParseError("expected a string".to_string());
        assert_eq!(unreadable.status_code(), 400);
        assert_eq!(config_error("bad port").status_code(), 500);
        let internal = WashbookError::InternalError("boom".to_string());
        assert_eq!(internal.status_code(), 500);
    }

    #[test]
    fn test_context_wraps_source_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));
        let err = result.context("binding listener").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: binding listener: address in use"
        );
    }
}

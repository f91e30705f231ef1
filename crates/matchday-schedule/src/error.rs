//! Error types for schedule pipeline operations.
//!
//! Per-row data-quality problems are not errors: they travel as
//! [`SkipReason`](crate::normalize::SkipReason) values. Errors here are the
//! whole-pipeline failures (upstream fetch, malformed envelope, bad
//! configuration) that abort a run.

use std::fmt;
use thiserror::Error;

/// The category of a schedule pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleErrorCode {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Server returned an error status.
    ServerError,
    /// Invalid response from the server - parse error, empty payload.
    InvalidResponse,
    /// Configuration error - missing or invalid config.
    ConfigurationError,
    /// Internal error - unexpected state, bug.
    InternalError,
}

impl ScheduleErrorCode {
    /// Returns true if this error is transient and the operation may be
    /// retried by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::ServerError)
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ScheduleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that aborts a schedule pipeline run.
#[derive(Debug, Error)]
pub struct ScheduleError {
    code: ScheduleErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ScheduleError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ScheduleErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ScheduleErrorCode::NetworkError, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ScheduleErrorCode::ServerError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ScheduleErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ScheduleErrorCode::ConfigurationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ScheduleErrorCode::InternalError, message)
    }

    /// Sets the source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ScheduleErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for schedule pipeline operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_retryable() {
        assert!(ScheduleErrorCode::NetworkError.is_retryable());
        assert!(ScheduleErrorCode::ServerError.is_retryable());
        assert!(!ScheduleErrorCode::InvalidResponse.is_retryable());
        assert!(!ScheduleErrorCode::ConfigurationError.is_retryable());
    }

    #[test]
    fn error_creation() {
        let err = ScheduleError::invalid_response("schedule payload was empty");
        assert_eq!(err.code(), ScheduleErrorCode::InvalidResponse);
        assert_eq!(err.message(), "schedule payload was empty");
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_display() {
        let err = ScheduleError::network("connection timeout");
        let display = format!("{}", err);
        assert!(display.contains("network_error"));
        assert!(display.contains("connection timeout"));
    }

    #[test]
    fn error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("disk full");
        let err = ScheduleError::internal("failed to write").with_source(io_err);
        assert!(err.source().is_some());
    }
}

//! Error types for the NexusMind client.
//!
//! This module provides a unified error type with explicit variants for
//! storage, transport, authentication, and server-reported failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for NexusMind client operations.
///
/// Each variant maps to a distinct failure domain so callers can react to
/// specific cases (retry on network failure, re-login on auth failure).
#[derive(Debug, Error)]
pub enum Error {
    /// Credential persistence errors (session file unreadable, disk full).
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Network transport errors (connection, TLS, timeout, malformed body).
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Authentication errors (invalid credentials, rejected token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the backend other than authorization
    /// failures.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Transport-level errors where no usable response was received.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The username/password exchange was rejected.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The stored bearer token was rejected by the backend.
    #[error("session expired or token rejected")]
    TokenRejected,

    /// An operation that requires a login was attempted without one.
    #[error("not logged in")]
    NotAuthenticated,
}

/// A non-success response from the backend.
///
/// The backend sometimes includes a structured `detail` message in error
/// bodies and sometimes does not, so `detail` is optional.
#[derive(Debug)]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// Structured error message from the response body, if present.
    pub detail: Option<String>,
}

impl ServerError {
    /// Create a new server error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_with_detail() {
        let err = ServerError::new(500, Some("index unavailable".to_string()));
        assert_eq!(err.to_string(), "HTTP 500: index unavailable");
    }

    #[test]
    fn server_error_display_without_detail() {
        let err = ServerError::new(503, None);
        assert_eq!(err.to_string(), "HTTP 503");
    }
}

//! Error types for the APP client
//!
//! Provides a unified error type for all operations.

use std::io::ErrorKind;

use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified error type for APP client operations
#[derive(Debug, Error)]
pub enum AppError {
    // -------------------------------------------------------------------------
    // Connection Errors (fatal to the session)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Handshake Errors (fatal to construction)
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Authentication failed (code {code}): {message}")]
    Authentication { code: i64, message: String },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for transport-level failures after which the session must be
    /// discarded and reconnected.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Timeout(_) | AppError::Connection(_)
        )
    }

    /// True if this is the timeout variant of a connection error
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            // Unix reports an expired socket timeout as WouldBlock, Windows as TimedOut
            ErrorKind::TimedOut | ErrorKind::WouldBlock => AppError::Timeout(err.to_string()),
            ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe => AppError::Connection(err.to_string()),
            _ => AppError::Io(err),
        }
    }
}

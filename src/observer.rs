//! Session observer
//!
//! Protocol anomalies and wire traces are reported to an observer owned by
//! the session instead of a process-wide log. [`TracingObserver`] forwards
//! everything to `tracing`.

use crate::protocol::StatusKind;

/// Direction of a traced wire line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// A non-fatal protocol anomaly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `OK` with a non-zero code or `ER` with a zero code. The numeric code
    /// is still the one used for the session status.
    StatusMismatch {
        kind: StatusKind,
        code: i64,
        line: String,
    },

    /// The first response line did not match the status grammar
    UnparsedStatus { line: String },
}

/// Receives diagnostics and, when debug tracing is enabled, wire lines
pub trait Observer: Send {
    fn diagnostic(&self, event: &Diagnostic);

    fn trace(&self, direction: Direction, line: &str) {
        let _ = (direction, line);
    }
}

/// Default observer: warnings and traces go to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn diagnostic(&self, event: &Diagnostic) {
        match event {
            Diagnostic::StatusMismatch { kind, code, line } => {
                tracing::warn!(
                    "Server inconsistency: {} status with code {}: {}",
                    kind.as_str(),
                    code,
                    line
                );
            }
            Diagnostic::UnparsedStatus { line } => {
                tracing::debug!("Unparsable status line: {:?}", line);
            }
        }
    }

    fn trace(&self, direction: Direction, line: &str) {
        match direction {
            Direction::Sent => tracing::debug!(target: "appclient::wire", ">> {}", line),
            Direction::Received => tracing::debug!(target: "appclient::wire", "<< {}", line),
        }
    }
}

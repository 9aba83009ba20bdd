//! Session
//!
//! A connected, handshaken APP session. Owns the stream, runs the startup
//! handshake, sends commands and records the status of the last response.

use std::net::TcpStream;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::observer::{Diagnostic, Direction, Observer, TracingObserver};
use crate::protocol::{parse_status_line, Command, LineStream, Response, Status, END_MARKER};

use super::stream::{open_tcp, Stream};

/// Protocol version offered during the handshake
pub const PROTOCOL_VERSION: &str = "2.1";

/// Required start of the greeting message
pub const GREETING_PREFIX: &str = "HI APP";

/// A session with an APP server.
///
/// One command is in flight at a time. Status accessors reflect the most
/// recently completed response and never perform I/O.
pub struct Connection<S: Stream = TcpStream> {
    /// `None` once closed, or after a transport failure
    stream: Option<LineStream<S>>,

    /// Receives anomalies and, if `debug`, wire traces
    observer: Box<dyn Observer>,

    debug: bool,

    status: Status,

    /// Peer address for logging
    peer: String,
}

impl Connection<TcpStream> {
    /// Connect over TCP and run the handshake
    pub fn connect(config: &Config) -> Result<Self> {
        Self::connect_with_observer(config, Box::new(TracingObserver))
    }

    /// Connect over TCP with a custom observer
    pub fn connect_with_observer(config: &Config, observer: Box<dyn Observer>) -> Result<Self> {
        let stream = open_tcp(config)?;
        Self::establish(stream, config, observer)
    }
}

impl<S: Stream> Connection<S> {
    /// Run the handshake over an already open stream.
    ///
    /// 1. Read the greeting, which must start with `HI APP`
    /// 2. Negotiate the protocol version with `ver`
    /// 3. `login` if user, domain and password are all configured
    ///
    /// On failure the stream is shut down before the error is returned.
    pub fn establish(stream: S, config: &Config, observer: Box<dyn Observer>) -> Result<Self> {
        let peer = stream.peer();
        let mut conn = Self {
            stream: Some(LineStream::new(stream)),
            observer,
            debug: config.debug,
            status: Status::unparsed(""),
            peer,
        };

        match conn.handshake(config) {
            Ok(()) => {
                tracing::debug!("Session established with {}", conn.peer);
                Ok(conn)
            }
            Err(e) => {
                tracing::debug!("Handshake with {} failed: {}", conn.peer, e);
                conn.close();
                Err(e)
            }
        }
    }

    fn handshake(&mut self, config: &Config) -> Result<()> {
        self.read_response()?;
        if !self.status.message.starts_with(GREETING_PREFIX) {
            return Err(AppError::Protocol(format!(
                "unexpected greeting from {}: {:?}",
                self.peer, self.status.message
            )));
        }

        self.invoke("ver", [("ver", PROTOCOL_VERSION)])?;
        if !self.is_ok() {
            return Err(AppError::Protocol(format!(
                "version {} rejected (code {}): {}",
                PROTOCOL_VERSION, self.status.code, self.status.message
            )));
        }

        if let Some(creds) = config.credentials() {
            self.invoke(
                "login",
                [
                    ("user", creds.user.as_str()),
                    ("domain", creds.domain.as_str()),
                    ("password", creds.password.as_str()),
                ],
            )?;
            if !self.is_ok() {
                return Err(AppError::Authentication {
                    code: self.status.code,
                    message: self.status.message.clone(),
                });
            }
            tracing::debug!("Logged in as {}@{}", creds.user, creds.domain);
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Send any verb with named parameters and read the response.
    ///
    /// A non-zero status is not an error here; check [`Connection::is_ok`] or
    /// the returned response.
    pub fn invoke<I, K, V>(&mut self, verb: &str, params: I) -> Result<Response>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.execute(&Command::with_params(verb, params))
    }

    /// Send a prepared command and read the response
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        command.validate()?;
        let line = command.encode();

        let stream = self.stream.as_mut().ok_or_else(closed)?;
        if self.debug {
            self.observer.trace(Direction::Sent, &line);
            self.observer.trace(Direction::Sent, END_MARKER);
        }
        tracing::trace!("Sending {} to {}", command.verb(), self.peer);

        if let Err(e) = stream.send_request(&line) {
            return Err(self.fail(e));
        }

        self.read_response()
    }

    /// Read one response and update the session status from its first line
    pub fn read_response(&mut self) -> Result<Response> {
        let stream = self.stream.as_mut().ok_or_else(closed)?;
        let observer = &self.observer;
        let debug = self.debug;

        let result = stream.read_response_lines(|line| {
            if debug {
                observer.trace(Direction::Received, line);
            }
        });
        let lines = match result {
            Ok(lines) => lines,
            Err(e) => return Err(self.fail(e)),
        };

        // No status line to parse means the response is truncated
        let first = match lines.first() {
            Some(first) if !first.is_empty() => first,
            _ => {
                let err = AppError::Connection(format!("empty response from {}", self.peer));
                return Err(self.fail(err));
            }
        };

        let status = match parse_status_line(first) {
            Some(parsed) => {
                if parsed.is_inconsistent() {
                    self.observer.diagnostic(&Diagnostic::StatusMismatch {
                        kind: parsed.kind,
                        code: parsed.code,
                        line: first.clone(),
                    });
                }
                Status {
                    code: parsed.code,
                    message: parsed.message.to_string(),
                }
            }
            None => {
                self.observer.diagnostic(&Diagnostic::UnparsedStatus {
                    line: first.clone(),
                });
                Status::unparsed(first.as_str())
            }
        };

        self.status = status.clone();
        Ok(Response::new(status, lines))
    }

    /// Drop the stream after a transport failure
    fn fail(&mut self, err: AppError) -> AppError {
        if err.is_connection_error() {
            tracing::warn!("Connection to {} lost: {}", self.peer, err);
            self.close();
        }
        err
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    /// True iff the last status code is exactly zero
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Last status code, `-1` if the status line did not parse
    pub fn code(&self) -> i64 {
        self.status.code
    }

    /// Last status message, or the raw first line if it did not parse
    pub fn message(&self) -> &str {
        &self.status.message
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Release the stream. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.get_mut().shutdown() {
                tracing::debug!("Shutdown of {} failed: {}", self.peer, e);
            }
            tracing::debug!("Closed session with {}", self.peer);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Get the peer address string
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl<S: Stream> Drop for Connection<S> {
    fn drop(&mut self) {
        self.close();
    }
}

fn closed() -> AppError {
    AppError::Connection("session is closed".to_string())
}

//! Byte Streams
//!
//! The session runs over any duplex byte stream. TCP is the built-in one;
//! tunnels and in-memory doubles implement [`Stream`] themselves.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{AppError, Result};

/// A bidirectional byte stream owned by a session
pub trait Stream: Read + Write + Send {
    /// Release the underlying resource. Called once when the session closes.
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Remote address for logging
    fn peer(&self) -> String {
        "unknown".to_string()
    }
}

impl Stream for TcpStream {
    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }

    fn peer(&self) -> String {
        self.peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

/// Open a TCP stream to the configured endpoint.
///
/// Tries every resolved address in turn and applies the configured timeout to
/// connect, read and write.
pub fn open_tcp(config: &Config) -> Result<TcpStream> {
    if config.port == 0 {
        return Err(AppError::Config("server port is not set".to_string()));
    }

    let addrs = (config.host.as_str(), config.port).to_socket_addrs()?;
    let timeout = config.socket_timeout();
    let mut last_err = None;

    for addr in addrs {
        tracing::trace!("Connecting to {}", addr);
        let attempt = match timeout {
            Some(t) => TcpStream::connect_timeout(&addr, t),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => {
                // Commands are small and strictly request/response
                stream.set_nodelay(true)?;
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)?;
                return Ok(stream);
            }
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    Err(match last_err {
        Some(e) => e.into(),
        None => AppError::Connection(format!(
            "{}:{} did not resolve to any address",
            config.host, config.port
        )),
    })
}

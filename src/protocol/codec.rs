//! Line codec
//!
//! Line-oriented framing shared by requests and responses.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! VERB NAME1="value1" NAME2="value2"\n
//! .\n
//! ```
//!
//! ### Response
//! ```text
//! (OK|ER) <code> <message>\n
//! [payload line]*\n
//! .\n
//! ```

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{AppError, Result};
use super::Command;

/// Line terminator written after every line
pub const LINE_TERMINATOR: &str = "\n";

/// A line holding only this marks the end of a request or response
pub const END_MARKER: &str = ".";

/// Maximum accepted length of a single response line (1 MB)
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

// =============================================================================
// Line Writing
// =============================================================================

/// Write one line followed by the line terminator
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(LINE_TERMINATOR.as_bytes())?;
    Ok(())
}

/// Write an encoded request line and the end marker, then flush
pub fn write_request<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    write_line(writer, line)?;
    write_line(writer, END_MARKER)?;
    writer.flush()?;
    Ok(())
}

/// Validate and send a command.
///
/// Always exactly two lines, whatever the parameter count.
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    command.validate()?;
    write_request(writer, &command.encode())
}

// =============================================================================
// Line Reading
// =============================================================================

/// Read one line with its terminator (`\n` or `\r\n`) stripped.
///
/// Returns `None` at end of stream.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LENGTH as u64 + 1)
        .read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_LENGTH {
        return Err(AppError::Connection(format!(
            "Response line exceeds {} bytes",
            MAX_LINE_LENGTH
        )));
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read lines until the end marker, which is not included in the result.
///
/// `on_line` sees every line as it arrives, the end marker included.
/// Running out of stream before the marker is a connection error.
pub fn read_until_end<R, F>(reader: &mut R, mut on_line: F) -> Result<Vec<String>>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut lines = Vec::new();

    loop {
        let line = match read_line(reader)? {
            Some(line) => line,
            None => {
                return Err(AppError::Connection(format!(
                    "Stream closed after {} response lines without end marker",
                    lines.len()
                )))
            }
        };

        on_line(&line);

        if line == END_MARKER {
            return Ok(lines);
        }
        lines.push(line);
    }
}

// =============================================================================
// Buffered Duplex
// =============================================================================

/// Buffered reads over a stream that is also written to directly
pub struct LineStream<S: Read + Write> {
    inner: BufReader<S>,
}

impl<S: Read + Write> LineStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }

    pub fn send_request(&mut self, line: &str) -> Result<()> {
        write_request(self.inner.get_mut(), line)
    }

    pub fn read_response_lines<F: FnMut(&str)>(&mut self, on_line: F) -> Result<Vec<String>> {
        read_until_end(&mut self.inner, on_line)
    }

    pub fn get_ref(&self) -> &S {
        self.inner.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut S {
        self.inner.get_mut()
    }
}

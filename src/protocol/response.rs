//! Response definitions
//!
//! Status line grammar: `(OK|ER) <digits> <message>`, fields separated by one
//! or more whitespace characters. A first line that does not match is kept
//! verbatim with code [`Status::UNPARSED`].

/// Prefix of a well-formed status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Er,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Ok => "OK",
            StatusKind::Er => "ER",
        }
    }
}

/// A status line that matched the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub kind: StatusKind,
    pub code: i64,
    pub message: &'a str,
}

impl StatusLine<'_> {
    /// `OK` with a non-zero code, or `ER` with a zero code
    pub fn is_inconsistent(&self) -> bool {
        match self.kind {
            StatusKind::Ok => self.code != 0,
            StatusKind::Er => self.code == 0,
        }
    }
}

/// Parse a status line. Returns `None` if it does not match the grammar.
pub fn parse_status_line(line: &str) -> Option<StatusLine<'_>> {
    let kind = if line.starts_with("OK") {
        StatusKind::Ok
    } else if line.starts_with("ER") {
        StatusKind::Er
    } else {
        return None;
    };

    let rest = skip_whitespace(&line[2..])?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    // Codes too large for i64 cannot be represented; treat as unparsable
    let code = rest[..digits_end].parse::<i64>().ok()?;
    let message = skip_whitespace(&rest[digits_end..])?;

    Some(StatusLine {
        kind,
        code,
        message,
    })
}

/// Strip a non-empty run of leading whitespace, failing if there is none
fn skip_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    if trimmed.len() == s.len() {
        None
    } else {
        Some(trimmed)
    }
}

/// Status of the most recently completed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Numeric status; `0` is success, [`Status::UNPARSED`] marks a first line
    /// that did not match the status grammar
    pub code: i64,

    /// Parsed message, or the whole first line when `code` is `UNPARSED`
    pub message: String,
}

impl Status {
    /// Sentinel code for a status line that did not match the grammar
    pub const UNPARSED: i64 = -1;

    /// Derive the status from the first line of a response
    pub fn from_line(line: &str) -> Self {
        match parse_status_line(line) {
            Some(parsed) => Self {
                code: parsed.code,
                message: parsed.message.to_string(),
            },
            None => Self::unparsed(line),
        }
    }

    pub fn unparsed(line: impl Into<String>) -> Self {
        Self {
            code: Self::UNPARSED,
            message: line.into(),
        }
    }

    /// True only for code zero. There is no category scheme: every other code,
    /// including `UNPARSED`, is a failure.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// The lines of one server response, terminator excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    lines: Vec<String>,
}

impl Response {
    /// Build a response from its lines. The first line must exist.
    pub(crate) fn new(status: Status, lines: Vec<String>) -> Self {
        Self { status, lines }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// All lines, status line first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn status_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// Lines after the status line; their meaning depends on the verb
    pub fn payload(&self) -> &[String] {
        self.lines.get(1..).unwrap_or(&[])
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

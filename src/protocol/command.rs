//! Command definitions
//!
//! A command is a verb plus named string parameters. Verbs are not a fixed
//! enumeration; any verb the server understands can be sent.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};

/// A request to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: String,

    /// Parameters keyed by their uppercased wire name. Ordered so the encoded
    /// line is deterministic.
    params: BTreeMap<String, String>,
}

impl Command {
    /// Create a command with no parameters
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            params: BTreeMap::new(),
        }
    }

    /// Create a command from any iterator of `(name, value)` pairs
    pub fn with_params<I, K, V>(verb: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(Self::new(verb), |cmd, (name, value)| cmd.param(name, value))
    }

    /// Add a parameter. Names are case-insensitive; a later value for the same
    /// name replaces an earlier one.
    pub fn param(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.params
            .insert(name.as_ref().to_uppercase(), value.into());
        self
    }

    /// The verb as supplied by the caller
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Parameters keyed by uppercased name
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Check that the command can be framed as a single request line
    pub fn validate(&self) -> Result<()> {
        if self.verb.is_empty() {
            return Err(AppError::InvalidCommand("verb is empty".to_string()));
        }
        if self.verb.chars().any(char::is_whitespace) {
            return Err(AppError::InvalidCommand(format!(
                "verb {:?} contains whitespace",
                self.verb
            )));
        }

        for (name, value) in &self.params {
            if name.is_empty() {
                return Err(AppError::InvalidCommand(format!(
                    "{}: parameter name is empty",
                    self.verb
                )));
            }
            if name.chars().any(|c| c.is_whitespace() || c == '=' || c == '"') {
                return Err(AppError::InvalidCommand(format!(
                    "{}: invalid parameter name {:?}",
                    self.verb, name
                )));
            }
            if value.contains(['\r', '\n']) {
                return Err(AppError::InvalidCommand(format!(
                    "{}: value of {} contains a line break",
                    self.verb, name
                )));
            }
        }

        Ok(())
    }

    /// Render the request line, without the line terminator.
    ///
    /// `VERB NAME1="value1" NAME2="value2"`
    pub fn encode(&self) -> String {
        let mut line = self.verb.to_uppercase();
        for (name, value) in &self.params {
            line.push(' ');
            line.push_str(name);
            line.push_str("=\"");
            line.push_str(&escape_value(value));
            line.push('"');
        }
        line
    }
}

/// Double every `"` in a parameter value.
///
/// This is the only escaping the protocol defines. It is not reversible for
/// every input: see [`unescape_value`].
pub fn escape_value(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Inverse of [`escape_value`]: collapse each `""` pair back to `"`.
///
/// Expects the escaped body without the surrounding quotes. Known limitation:
/// runs of consecutive quotes are not round-trip safe. An odd run is not a
/// valid escape but is accepted anyway, its last quote kept as-is, so `"""`
/// and `""""` both decode to `""` and re-escaping the result does not give
/// back the input.
pub fn unescape_value(escaped: &str) -> String {
    escaped.replace("\"\"", "\"")
}

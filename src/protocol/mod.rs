//! Protocol Module
//!
//! Defines the APP wire protocol: line-oriented, one command in flight at a
//! time, requests and responses both closed by a line holding a single `.`.
//!
//! ## Request
//! ```text
//! DOMAIN_ADD DOMAIN="example.com" QUOTA="100"
//! .
//! ```
//! - Verb and parameter names are uppercased
//! - Values are wrapped in `"` with every inner `"` doubled
//!
//! ## Response
//! ```text
//! OK 0 domain added
//! .
//! ```
//!
//! ### Status Codes
//! - `0`: success
//! - anything else: failure (no category scheme)
//! - `-1`: client-side sentinel for a first line that did not parse

mod command;
mod response;
mod codec;

pub use command::{Command, escape_value, unescape_value};
pub use response::{parse_status_line, Response, Status, StatusKind, StatusLine};
pub use codec::{
    read_line, read_until_end, write_command, write_line, write_request, LineStream, END_MARKER,
    LINE_TERMINATOR, MAX_LINE_LENGTH,
};

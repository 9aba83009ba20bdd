//! # appclient
//!
//! A blocking client for the Account Provisioning Protocol (APP), a
//! line-oriented request/response protocol for provisioning domains and
//! mailboxes on a remote server.
//!
//! - Startup handshake: greeting, version negotiation, optional login
//! - Any verb can be invoked with named parameters, no per-verb code needed
//! - Multi-line responses framed by a `.` terminator line
//! - Status of the last command via `is_ok()` / `code()` / `message()`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Connection (session)                        │
//! │   handshake · invoke(verb, params) · status accessors       │
//! └─────────────┬─────────────────────────────┬─────────────────┘
//!               │                             │
//!               ▼                             ▼
//!   ┌───────────────────────┐       ┌───────────────────┐
//!   │  Protocol             │       │  Observer         │
//!   │  Command · Status     │       │  diagnostics,     │
//!   │  line codec           │       │  wire trace       │
//!   └───────────┬───────────┘       └───────────────────┘
//!               │
//!               ▼
//!   ┌───────────────────────┐
//!   │  Stream (TCP/tunnel)  │
//!   └───────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use appclient::{Config, Connection};
//!
//! # fn main() -> appclient::Result<()> {
//! let config = Config::builder()
//!     .host("provisioning.example.com")
//!     .port(4000)
//!     .user("admin")
//!     .domain("example.com")
//!     .password("secret")
//!     .build();
//!
//! let mut conn = Connection::connect(&config)?;
//! let response = conn.invoke("mailbox_add", [("mailbox", "alice"), ("domain", "example.com")])?;
//! if !conn.is_ok() {
//!     eprintln!("failed ({}): {}", conn.code(), conn.message());
//! }
//! for line in response.payload() {
//!     println!("{}", line);
//! }
//! conn.close();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod observer;
pub mod network;
pub mod verbs;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AppError, Result};
pub use config::{Config, Credentials};
pub use network::{Connection, Stream};
pub use observer::{Diagnostic, Direction, Observer, TracingObserver};
pub use protocol::{Command, Response, Status};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of appclient
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

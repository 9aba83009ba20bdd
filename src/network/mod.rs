//! Network Module
//!
//! Session lifecycle over a byte stream.
//!
//! ## Architecture
//! - [`Stream`]: any duplex byte stream; TCP built in
//! - [`Connection`]: owns the stream, runs the handshake, invokes commands
//! - Strictly one command in flight per connection

mod stream;
mod connection;

pub use stream::{open_tcp, Stream};
pub use connection::{Connection, GREETING_PREFIX, PROTOCOL_VERSION};

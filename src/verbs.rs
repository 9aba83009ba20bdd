//! Known verbs
//!
//! Typed shorthands for common verbs. Each is a plain call to
//! [`Connection::invoke`]; verbs missing from this table work just as well
//! through `invoke` directly.

use crate::error::Result;
use crate::network::{Connection, Stream};
use crate::protocol::Response;

macro_rules! verbs {
    ($( $(#[$doc:meta])* $method:ident => $verb:literal, )*) => {
        /// Wire names of the verbs that have a shorthand method
        pub const KNOWN_VERBS: &[&str] = &[$($verb),*];

        impl<S: Stream> Connection<S> {
            $(
                $(#[$doc])*
                pub fn $method<I, K, V>(&mut self, params: I) -> Result<Response>
                where
                    I: IntoIterator<Item = (K, V)>,
                    K: AsRef<str>,
                    V: Into<String>,
                {
                    self.invoke($verb, params)
                }
            )*
        }
    };
}

verbs! {
    /// Negotiate the protocol version (`VER`)
    ver => "ver",
    /// Authenticate (`USER`, `DOMAIN`, `PASSWORD`)
    login => "login",
    /// End the session server-side
    quit => "quit",

    domain_add => "domain_add",
    domain_del => "domain_del",
    domain_list => "domain_list",
    domain_info => "domain_info",

    mailbox_add => "mailbox_add",
    mailbox_del => "mailbox_del",
    mailbox_list => "mailbox_list",
    mailbox_info => "mailbox_info",
    /// Change a mailbox password
    mailbox_passwd => "mailbox_passwd",

    alias_add => "alias_add",
    alias_del => "alias_del",
    alias_list => "alias_list",
}

/// True if `verb` has a generated shorthand (case-insensitive)
pub fn is_known_verb(verb: &str) -> bool {
    KNOWN_VERBS.iter().any(|known| known.eq_ignore_ascii_case(verb))
}

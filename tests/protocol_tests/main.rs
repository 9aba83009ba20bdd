//! Protocol tests: encoding, escaping and line framing

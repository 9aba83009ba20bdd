//! Session tests over a scripted in-memory stream

mod support;

mod handshake_tests;

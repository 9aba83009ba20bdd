//! Tests for the startup handshake
//!
//! These tests verify:
//! - Greeting validation
//! - Version negotiation
//! - Automatic login when all credentials are configured
//! - No stream is left open when construction fails

use appclient::network::PROTOCOL_VERSION;
use appclient::{AppError, Config, Direction};

use crate::support::{establish, HANDSHAKE};

fn login_config() -> Config {
    Config::builder()
        .user("admin")
        .domain("example.com")
        .password("secret")
        .build()
}

// =============================================================================
// Greeting
// =============================================================================

#[test]
fn test_handshake_success() {
    let (conn, probe, _) = establish(HANDSHAKE, &Config::default());
    let conn = conn.unwrap();

    assert!(conn.is_ok());
    assert_eq!(conn.message(), "version accepted");
    assert!(!conn.is_closed());
    assert_eq!(conn.peer(), "scripted");
    assert_eq!(
        probe.written(),
        format!("VER VER=\"{}\"\n.\n", PROTOCOL_VERSION)
    );
}

#[test]
fn test_wrong_greeting_fails_and_closes() {
    let (conn, probe, _) = establish("OK 0 HELLO SMTP\n.\n", &Config::default());

    assert!(matches!(conn, Err(AppError::Protocol(_))));
    assert!(probe.is_shut_down());
    // Nothing sent after a bad greeting
    assert_eq!(probe.written(), "");
}

#[test]
fn test_greeting_is_case_sensitive() {
    let (conn, probe, _) = establish("OK 0 hi app\n.\n", &Config::default());
    assert!(matches!(conn, Err(AppError::Protocol(_))));
    assert!(probe.is_shut_down());
}

#[test]
fn test_greeting_must_be_anchored() {
    let (conn, _, _) = establish("OK 0 SAY HI APP\n.\n", &Config::default());
    assert!(matches!(conn, Err(AppError::Protocol(_))));
}

#[test]
fn test_unparsed_greeting_line_is_matched_whole() {
    let script = "HI APP server ready\n.\nOK 0 version accepted\n.\n";
    let (conn, _, observer) = establish(script, &Config::default());

    assert!(conn.is_ok());
    assert_eq!(observer.diagnostics().len(), 1);
}

#[test]
fn test_missing_greeting_is_connection_error() {
    let (conn, probe, _) = establish("", &Config::default());
    let err = conn.err().unwrap();
    assert!(err.is_connection_error());
    assert!(probe.is_shut_down());
}

// =============================================================================
// Version Negotiation
// =============================================================================

#[test]
fn test_version_rejected() {
    let script = "OK 0 HI APP\n.\nER 5 unsupported version\n.\n";
    let (conn, probe, _) = establish(script, &Config::default());

    match conn {
        Err(AppError::Protocol(msg)) => assert!(msg.contains("unsupported version")),
        other => panic!("expected protocol error, got {:?}", other.err()),
    }
    assert!(probe.is_shut_down());
}

#[test]
fn test_version_reply_unparsable() {
    let script = "OK 0 HI APP\n.\nwhat?\n.\n";
    let (conn, probe, _) = establish(script, &Config::default());

    assert!(matches!(conn, Err(AppError::Protocol(_))));
    assert!(probe.is_shut_down());
}

// =============================================================================
// Login
// =============================================================================

#[test]
fn test_login_success() {
    let script = format!("{}OK 0 welcome\n.\n", HANDSHAKE);
    let (conn, probe, _) = establish(&script, &login_config());

    let conn = conn.unwrap();
    assert_eq!(conn.message(), "welcome");
    assert_eq!(
        probe.written_lines()[2],
        "LOGIN DOMAIN=\"example.com\" PASSWORD=\"secret\" USER=\"admin\""
    );
    assert_eq!(probe.written_lines().len(), 4);
}

#[test]
fn test_login_failure_is_authentication_error() {
    let script = format!("{}ER 13 bad password\n.\n", HANDSHAKE);
    let (conn, probe, _) = establish(&script, &login_config());

    match conn {
        Err(AppError::Authentication { code, message }) => {
            assert_eq!(code, 13);
            assert_eq!(message, "bad password");
        }
        other => panic!("expected authentication error, got {:?}", other.err()),
    }
    assert!(probe.is_shut_down());
}

#[test]
fn test_login_unparsable_reply_is_authentication_error() {
    let script = format!("{}nope\n.\n", HANDSHAKE);
    let (conn, _, _) = establish(&script, &login_config());

    assert!(matches!(
        conn,
        Err(AppError::Authentication { code: -1, .. })
    ));
}

#[test]
fn test_partial_credentials_skip_login() {
    let config = Config::builder().user("admin").password("secret").build();
    let (conn, probe, _) = establish(HANDSHAKE, &config);

    assert!(conn.is_ok());
    assert_eq!(probe.written_lines().len(), 2);
}

// =============================================================================
// Tracing
// =============================================================================

#[test]
fn test_debug_traces_every_line() {
    let config = Config::builder().debug(true).build();
    let (conn, _, observer) = establish(HANDSHAKE, &config);
    assert!(conn.is_ok());

    let traces = observer.traces();
    let expected = vec![
        (Direction::Received, "OK 0 HI APP/2.1 ready".to_string()),
        (Direction::Received, ".".to_string()),
        (Direction::Sent, format!("VER VER=\"{}\"", PROTOCOL_VERSION)),
        (Direction::Sent, ".".to_string()),
        (Direction::Received, "OK 0 version accepted".to_string()),
        (Direction::Received, ".".to_string()),
    ];
    assert_eq!(traces, expected);
}

#[test]
fn test_no_traces_without_debug() {
    let (conn, _, observer) = establish(HANDSHAKE, &Config::default());
    assert!(conn.is_ok());
    assert!(observer.traces().is_empty());
}

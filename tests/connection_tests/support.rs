//! Test doubles: a scripted in-memory stream and a recording observer.

use std::io::{self, Cursor, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use appclient::{Config, Connection, Diagnostic, Direction, Observer, Result, Stream};

// =============================================================================
// Scripted Stream
// =============================================================================

/// Replays a fixed server script and records everything the client writes
pub struct ScriptedStream {
    input: Cursor<Vec<u8>>,
    written: Arc<Mutex<Vec<u8>>>,
    shut_down: Arc<AtomicBool>,
}

/// Shared view of a `ScriptedStream` that outlives the session
#[derive(Clone)]
pub struct StreamProbe {
    written: Arc<Mutex<Vec<u8>>>,
    shut_down: Arc<AtomicBool>,
}

impl ScriptedStream {
    pub fn new(script: &str) -> (Self, StreamProbe) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let shut_down = Arc::new(AtomicBool::new(false));
        let stream = Self {
            input: Cursor::new(script.as_bytes().to_vec()),
            written: Arc::clone(&written),
            shut_down: Arc::clone(&shut_down),
        };
        (stream, StreamProbe { written, shut_down })
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for ScriptedStream {
    fn shutdown(&mut self) -> io::Result<()> {
        self.shut_down.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn peer(&self) -> String {
        "scripted".to_string()
    }
}

impl StreamProbe {
    /// Everything the client wrote, as text
    pub fn written(&self) -> String {
        String::from_utf8(self.written.lock().unwrap().clone()).unwrap()
    }

    /// Client lines, terminators stripped
    pub fn written_lines(&self) -> Vec<String> {
        self.written().lines().map(str::to_string).collect()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Recording Observer
// =============================================================================

#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
    pub traces: Arc<Mutex<Vec<(Direction, String)>>>,
}

impl RecordingObserver {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn traces(&self) -> Vec<(Direction, String)> {
        self.traces.lock().unwrap().clone()
    }
}

impl Observer for RecordingObserver {
    fn diagnostic(&self, event: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(event.clone());
    }

    fn trace(&self, direction: Direction, line: &str) {
        self.traces.lock().unwrap().push((direction, line.to_string()));
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Greeting plus a successful version negotiation
pub const HANDSHAKE: &str = "OK 0 HI APP/2.1 ready\n.\nOK 0 version accepted\n.\n";

/// Lines the client writes during a handshake without login
pub const HANDSHAKE_LINES: usize = 2;

pub fn establish(
    script: &str,
    config: &Config,
) -> (Result<Connection<ScriptedStream>>, StreamProbe, RecordingObserver) {
    let (stream, probe) = ScriptedStream::new(script);
    let observer = RecordingObserver::default();
    let conn = Connection::establish(stream, config, Box::new(observer.clone()));
    (conn, probe, observer)
}

/// Handshake followed by the given server replies
pub fn connected(
    replies: &str,
) -> (Connection<ScriptedStream>, StreamProbe, RecordingObserver) {
    let script = format!("{}{}", HANDSHAKE, replies);
    let (conn, probe, observer) = establish(&script, &Config::default());
    (conn.unwrap(), probe, observer)
}

/// Client lines written after the handshake
pub fn command_lines(probe: &StreamProbe) -> Vec<String> {
    probe.written_lines().split_off(HANDSHAKE_LINES)
}

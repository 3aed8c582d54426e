//! Test infrastructure for pulse-simple-rs integration tests.
//!
//! Provides configurations, connections wired to the in-memory transport and
//! helpers for producing PCM without an audio server.

#![allow(dead_code)]

use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

// Re-export key types from the main crate
pub use pulse_simple_rs::code::ErrorCode;
pub use pulse_simple_rs::config::{Direction, StreamConfig};
pub use pulse_simple_rs::connection::StreamConnection;
pub use pulse_simple_rs::error::StreamError;
pub use pulse_simple_rs::format::{SampleFormat, SampleSpec};
pub use pulse_simple_rs::transport::memory::{MemoryInspector, MemoryTransport, SessionRecord};

/// Creates the playback configuration used throughout the tests.
pub fn test_config() -> StreamConfig {
    StreamConfig::new("app", Direction::Playback, "music")
}

/// Creates a connection over the memory transport and its inspector.
pub fn memory_connection(config: StreamConfig) -> (StreamConnection, MemoryInspector) {
    let transport = MemoryTransport::new();
    let inspector = transport.inspector();

    (StreamConnection::with_config(transport, config), inspector)
}

/// Bytes 0..len wrapping at 256.
pub fn ramp_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Interleaved 16-bit samples counting up from zero.
pub fn ramp_samples(len: usize) -> Vec<i16> {
    (0..len).map(|i| i as i16).collect()
}

/// Accepts one TCP connection on an ephemeral port and collects everything
/// the peer sends until it closes the socket.
pub struct TcpSink {
    pub addr: String,
    received: mpsc::Receiver<Vec<u8>>,
    handle: JoinHandle<()>,
}

impl TcpSink {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut data = Vec::new();
            stream.read_to_end(&mut data).unwrap();
            tx.send(data).unwrap();
        });

        Self {
            addr,
            received: rx,
            handle,
        }
    }

    /// Waits for the peer to close and returns what it sent.
    pub fn finish(self) -> Vec<u8> {
        let data = self.received.recv().unwrap();
        self.handle.join().unwrap();
        data
    }
}

/// An address nothing listens on.
pub fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    addr
}

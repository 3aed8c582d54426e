//! Boundary to the audio transport service.
//!
//! A `Transport` opens streams; the opened `TransportStream` is the handle.
//! Dropping the boxed stream closes it, so a handle is released exactly once
//! no matter how its owner goes away.

pub mod memory;
pub mod tcp;
pub mod wav_file;

use crate::code::ErrorCode;
use crate::config::Direction;
use crate::format::{BufferAttr, ChannelMap, SampleSpec};

pub use memory::MemoryTransport;
pub use tcp::TcpTransport;
pub use wav_file::WavFileTransport;

/// Validated parameters of a stream handshake.
///
/// `server` and `device` are `None` when the transport should use its default.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenRequest<'a> {
    pub server: Option<&'a str>,
    pub client_name: &'a str,
    pub direction: Direction,
    pub device: Option<&'a str>,
    pub description: &'a str,
    pub sample_spec: SampleSpec,
    pub channel_map: Option<&'a ChannelMap>,
    pub buffer_attr: Option<&'a BufferAttr>,
}

pub trait Transport: Send {
    /// Performs the handshake and returns the open stream.
    fn open(&self, request: &OpenRequest<'_>) -> Result<Box<dyn TransportStream>, ErrorCode>;
}

/// An open stream. Closed when dropped.
pub trait TransportStream: Send {
    /// Hands `bytes` to the server, blocking until they are buffered.
    ///
    /// Returns the number of bytes accepted, which is all of them.
    fn send(&mut self, bytes: &[u8]) -> Result<usize, ErrorCode>;

    /// Blocks until everything sent so far has been rendered.
    fn wait_until_rendered(&mut self) -> Result<(), ErrorCode>;
}

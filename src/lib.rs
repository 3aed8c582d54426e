//! pulse-simple-rs library crate
//!
//! A blocking client for streaming raw PCM to or from an audio server
//! through a single connection object. The command line player is in main.rs.

#[macro_use]
extern crate log;

pub mod async_connection;
pub mod code;
pub mod config;
pub mod connection;
pub mod constants;
pub mod error;
pub mod format;
pub mod pcm;
pub mod sources;
pub mod transport;

pub use async_connection::AsyncStreamConnection;
pub use code::ErrorCode;
pub use config::{Direction, StreamConfig};
pub use connection::StreamConnection;
pub use error::StreamError;
pub use format::{BufferAttr, ChannelMap, ChannelPosition, SampleFormat, SampleSpec};

// Test modules
#[cfg(test)]
mod code_tests;

//! Caller-facing error taxonomy of a stream connection.

use thiserror::Error;

use crate::code::ErrorCode;

/// Every failure a `StreamConnection` can report.
///
/// Each condition is its own variant so callers can branch on the kind:
/// retry the handshake, fix the configuration or give up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// `connect` was called while a stream is already open.
    #[error("Already connected to the audio server")]
    AlreadyConnected,

    /// `write` or `drain` was called without an open stream.
    #[error("Not connected to the audio server")]
    NotConnected,

    /// The client name is absent or empty.
    #[error("The application name can't be empty")]
    MissingName,

    /// No stream direction was configured.
    #[error("No direction specified")]
    MissingDirection,

    /// The configured direction is not one of playback, record or upload.
    #[error("Invalid direction specified: {0:?}")]
    InvalidDirection(String),

    /// The stream description is absent or empty.
    #[error("The stream name can't be empty")]
    MissingDescription,

    #[error("Invalid sample format: {0:?}")]
    InvalidSampleFormat(String),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidRate(u32),

    #[error("Invalid channel count: {0}")]
    InvalidChannels(u8),

    #[error("Invalid channel map: {0}")]
    InvalidChannelMap(String),

    #[error("Invalid buffer attributes: {0}")]
    InvalidBufferAttr(String),

    /// A configuration field was changed while the stream is open.
    #[error("Configuration can't be changed while connected")]
    ConfigurationLocked,

    /// The server rejected the handshake.
    #[error("Error connecting to the audio server: {0}")]
    ConnectionFailed(ErrorCode),

    #[error("Error writing to the audio server: {0}")]
    WriteError(ErrorCode),

    #[error("Error draining the stream: {0}")]
    DrainError(ErrorCode),

    /// The blocking task running an operation did not complete.
    #[error("Stream task failed: {0}")]
    Runtime(String),
}

impl StreamError {
    /// The transport diagnostic carried by this error, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            StreamError::ConnectionFailed(code)
            | StreamError::WriteError(code)
            | StreamError::DrainError(code) => Some(*code),
            _ => None,
        }
    }

    /// True for errors caused by the configuration rather than the server.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StreamError::MissingName
                | StreamError::MissingDirection
                | StreamError::InvalidDirection(_)
                | StreamError::MissingDescription
                | StreamError::InvalidSampleFormat(_)
                | StreamError::InvalidRate(_)
                | StreamError::InvalidChannels(_)
                | StreamError::InvalidChannelMap(_)
                | StreamError::InvalidBufferAttr(_)
        )
    }
}

pub type Result<T, E = StreamError> = std::result::Result<T, E>;

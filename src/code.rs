//! Numeric diagnostic codes reported by the audio transport.
//!
//! The values follow the audio server's own error table so that codes coming
//! from a real server and codes produced by the local transports read the same.

use std::fmt::{Display, Formatter};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub const OK: ErrorCode = ErrorCode(0);
    pub const ACCESS: ErrorCode = ErrorCode(1);
    pub const COMMAND: ErrorCode = ErrorCode(2);
    pub const INVALID: ErrorCode = ErrorCode(3);
    pub const EXIST: ErrorCode = ErrorCode(4);
    pub const NOENTITY: ErrorCode = ErrorCode(5);
    pub const CONNECTION_REFUSED: ErrorCode = ErrorCode(6);
    pub const PROTOCOL: ErrorCode = ErrorCode(7);
    pub const TIMEOUT: ErrorCode = ErrorCode(8);
    pub const AUTHKEY: ErrorCode = ErrorCode(9);
    pub const INTERNAL: ErrorCode = ErrorCode(10);
    pub const CONNECTION_TERMINATED: ErrorCode = ErrorCode(11);
    pub const KILLED: ErrorCode = ErrorCode(12);
    pub const INVALID_SERVER: ErrorCode = ErrorCode(13);
    pub const MODINIT_FAILED: ErrorCode = ErrorCode(14);
    pub const BAD_STATE: ErrorCode = ErrorCode(15);
    pub const NODATA: ErrorCode = ErrorCode(16);
    pub const VERSION: ErrorCode = ErrorCode(17);
    pub const TOO_LARGE: ErrorCode = ErrorCode(18);
    pub const NOT_SUPPORTED: ErrorCode = ErrorCode(19);
    pub const UNKNOWN: ErrorCode = ErrorCode(20);
    pub const NO_EXTENSION: ErrorCode = ErrorCode(21);
    pub const OBSOLETE: ErrorCode = ErrorCode(22);
    pub const NOT_IMPLEMENTED: ErrorCode = ErrorCode(23);
    pub const FORKED: ErrorCode = ErrorCode(24);
    pub const IO: ErrorCode = ErrorCode(25);
    pub const BUSY: ErrorCode = ErrorCode(26);

    pub fn value(self) -> u32 {
        self.0
    }

    /// Human-readable rendering of the code, as the audio server prints it.
    pub fn message(self) -> &'static str {
        match self.0 {
            0 => "OK",
            1 => "Access denied",
            2 => "Unknown command",
            3 => "Invalid argument",
            4 => "Entity exists",
            5 => "No such entity",
            6 => "Connection refused",
            7 => "Protocol error",
            8 => "Timeout",
            9 => "No authentication key",
            10 => "Internal error",
            11 => "Connection terminated",
            12 => "Entity killed",
            13 => "Invalid server",
            14 => "Module initialization failed",
            15 => "Bad state",
            16 => "No data",
            17 => "Incompatible protocol version",
            18 => "Too large",
            19 => "Not supported",
            21 => "No such extension",
            22 => "Obsolete functionality",
            23 => "Missing implementation",
            24 => "Client forked",
            25 => "Input/Output error",
            26 => "Device or resource busy",
            _ => "Unknown error code",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message(), self.0)
    }
}

impl From<&io::Error> for ErrorCode {
    fn from(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::PermissionDenied => ErrorCode::ACCESS,
            io::ErrorKind::NotFound => ErrorCode::NOENTITY,
            io::ErrorKind::AlreadyExists => ErrorCode::EXIST,
            io::ErrorKind::ConnectionRefused => ErrorCode::CONNECTION_REFUSED,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => ErrorCode::CONNECTION_TERMINATED,
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ErrorCode::TIMEOUT,
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => ErrorCode::INVALID,
            io::ErrorKind::AddrNotAvailable => ErrorCode::INVALID_SERVER,
            io::ErrorKind::Unsupported => ErrorCode::NOT_SUPPORTED,
            _ => ErrorCode::IO,
        }
    }
}

impl From<io::Error> for ErrorCode {
    fn from(e: io::Error) -> Self {
        ErrorCode::from(&e)
    }
}

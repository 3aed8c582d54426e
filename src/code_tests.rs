//! Unit tests for the code module

#[cfg(test)]
mod tests {
    use crate::code::ErrorCode;
    use std::io;

    #[test]
    fn test_known_code_messages() {
        assert_eq!(ErrorCode::OK.message(), "OK");
        assert_eq!(ErrorCode::CONNECTION_REFUSED.message(), "Connection refused");
        assert_eq!(ErrorCode::IO.message(), "Input/Output error");
        assert_eq!(ErrorCode::BUSY.message(), "Device or resource busy");
    }

    #[test]
    fn test_unknown_code_message() {
        assert_eq!(ErrorCode(999).message(), "Unknown error code");
        assert_eq!(ErrorCode::UNKNOWN.message(), "Unknown error code");
    }

    #[test]
    fn test_display_includes_value() {
        let display = ErrorCode::TIMEOUT.to_string();
        assert!(display.contains("Timeout"));
        assert!(display.contains('8'));
    }

    #[test]
    fn test_io_error_mapping() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(ErrorCode::from(&refused), ErrorCode::CONNECTION_REFUSED);

        let broken = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(ErrorCode::from(broken), ErrorCode::CONNECTION_TERMINATED);

        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(ErrorCode::from(missing), ErrorCode::NOENTITY);

        let other = io::Error::other("disk on fire");
        assert_eq!(ErrorCode::from(other), ErrorCode::IO);
    }
}

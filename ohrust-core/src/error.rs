//! Error types for ohrust-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Instrument sent more data than the command's declared response lines
    #[error("Unsolicited response after complete reply: {text:?}")]
    ProtocolViolation {
        text: String,
    },

    /// Actuation response line did not equal the required acknowledgement token
    #[error("Acknowledgement mismatch for {command}: expected {expected:?}, got {actual:?}")]
    AckMismatch {
        command: String,
        expected: &'static str,
        actual: String,
    },
}

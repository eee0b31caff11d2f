//! Transport layer for the balance serial link
//!
//! Provides line-oriented serial communication, plus a scripted mock
//! transport for testing protocol logic without hardware.

pub mod error;
pub mod mock;
pub mod serial;

pub use error::{Error, Result};
pub use mock::MockTransport;
pub use serial::SerialTransport;

use async_trait::async_trait;

/// Transport trait for line-oriented instrument links
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the physical connection
    async fn connect(&mut self) -> Result<()>;

    /// Release the connection (idempotent)
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Append the frame terminator and write one command line
    async fn write_line(&mut self, line: &str) -> Result<()>;

    /// Read one terminated line, trimmed of surrounding whitespace.
    ///
    /// Blocks up to the read timeout; silence yields an empty string,
    /// not an error - the caller decides whether that is acceptable.
    async fn read_line(&mut self) -> Result<String>;

    /// Non-blocking check for buffered data not yet consumed
    async fn bytes_pending(&mut self) -> Result<bool>;

    /// Name of the underlying port
    fn port_name(&self) -> String;
}

//! Serial transport

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use serial2_tokio::SerialPort;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, trace, warn};

use ohrust_core::constants::{DEFAULT_BAUD, DEFAULT_READ_TIMEOUT, TERMINATOR};

use crate::{error::*, Transport};

/// Serial transport for the balance
pub struct SerialTransport {
    path: String,
    baud: u32,
    port: Option<SerialPort>,
    read_timeout: Duration,
    rx: BytesMut,
}

impl SerialTransport {
    /// Create a new serial transport (not yet opened)
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud: DEFAULT_BAUD,
            port: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
            rx: BytesMut::with_capacity(256),
        }
    }

    /// Set the line speed (default 9600)
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Set the per-line read timeout (default 1 s)
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Pull one complete line out of the receive buffer, if present.
    ///
    /// Consumes up to and including the newline; partial data stays put.
    fn take_buffered_line(&mut self) -> Option<String> {
        let pos = self.rx.iter().position(|&b| b == b'\n')?;
        let raw = self.rx.split_to(pos + 1);
        Some(String::from_utf8_lossy(&raw).trim().to_string())
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        debug!("Opening {} at {} baud...", self.path, self.baud);

        let port = SerialPort::open(&self.path, self.baud).map_err(|source| {
            Error::ConnectionFailed {
                port: self.path.clone(),
                source,
            }
        })?;

        debug!("Opened {}", self.path);

        self.port = Some(port);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("Closing {}...", self.path);
        }
        self.rx.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        let port = self.port.as_ref().ok_or(Error::NotConnected)?;

        trace!("TX {:?}", line);

        let frame = format!("{}{}", line, TERMINATOR);
        let mut remaining = frame.as_bytes();
        while !remaining.is_empty() {
            let n = port.write(remaining).await?;
            remaining = &remaining[n..];
        }

        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        if self.port.is_none() {
            return Err(Error::NotConnected);
        }

        if let Some(line) = self.take_buffered_line() {
            trace!("RX {:?}", line);
            return Ok(line);
        }

        let deadline = Instant::now() + self.read_timeout;
        loop {
            let port = self.port.as_ref().ok_or(Error::NotConnected)?;
            let mut chunk = [0u8; 256];

            let n = match timeout_at(deadline, port.read(&mut chunk)).await {
                Ok(read) => read?,
                Err(_) => {
                    trace!("RX timeout on {}", self.path);
                    return Ok(String::new());
                }
            };

            self.rx.extend_from_slice(&chunk[..n]);

            if let Some(line) = self.take_buffered_line() {
                trace!("RX {:?}", line);
                return Ok(line);
            }
        }
    }

    async fn bytes_pending(&mut self) -> Result<bool> {
        if !self.rx.is_empty() {
            return Ok(true);
        }

        let port = self.port.as_ref().ok_or(Error::NotConnected)?;

        // At 9600 baud anything already in flight arrives well within a
        // millisecond, so a short poll stands in for a true peek.
        let mut chunk = [0u8; 256];
        match timeout(Duration::from_millis(1), port.read(&mut chunk)).await {
            Ok(read) => {
                let n = read?;
                self.rx.extend_from_slice(&chunk[..n]);
                Ok(n > 0)
            }
            Err(_) => Ok(false),
        }
    }

    fn port_name(&self) -> String {
        self.path.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("Serial transport for {} dropped while still open", self.path);
        }
    }
}

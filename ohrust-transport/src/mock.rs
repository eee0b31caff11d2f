//! Scripted transport for deterministic testing of protocol logic.
//!
//! [`MockTransport`] implements [`Transport`] with pre-loaded
//! command/response exchanges, so framing and acknowledgement handling
//! can be tested without a balance on the bench.
//!
//! # Example
//!
//! ```
//! use ohrust_transport::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // When "PV" is written, the next read returns "1.10".
//! mock.expect("PV", &["1.10"]);
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{error::*, Transport};

/// A pre-loaded command/response exchange
#[derive(Debug, Clone)]
struct Exchange {
    /// The exact command line we expect to be written
    command: String,
    /// The response lines to hand back, in order
    responses: Vec<String>,
    /// Extra lines left pending after the declared responses, to simulate
    /// an instrument that talks more than it was asked to
    unsolicited: Vec<String>,
}

/// A scripted [`Transport`] for testing without hardware.
///
/// Exchanges are consumed in order: each `write_line` is matched against
/// the next expectation and queues that expectation's response lines for
/// subsequent `read_line` calls. Reading past the queued lines returns an
/// empty string, mirroring a serial read timeout.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Ordered queue of expected exchanges
    exchanges: VecDeque<Exchange>,
    /// Lines queued for `read_line`
    pending: VecDeque<String>,
    /// Whether the transport is "open"
    connected: bool,
    /// Log of every line written through this transport
    sent: Vec<String>,
}

impl MockTransport {
    /// Create a new mock transport (not yet connected)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected exchange: when `command` is written, the following
    /// `read_line` calls return `responses` in order.
    pub fn expect(&mut self, command: &str, responses: &[&str]) {
        self.exchanges.push_back(Exchange {
            command: command.to_string(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
            unsolicited: Vec::new(),
        });
    }

    /// Like [`expect`](Self::expect), but leaves `extra` pending after the
    /// declared responses have been read.
    pub fn expect_with_unsolicited(
        &mut self,
        command: &str,
        responses: &[&str],
        extra: &str,
    ) {
        self.exchanges.push_back(Exchange {
            command: command.to_string(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
            unsolicited: vec![extra.to_string()],
        });
    }

    /// Every line written through this transport, in order
    pub fn sent_lines(&self) -> &[String] {
        &self.sent
    }

    /// Number of expected exchanges not yet consumed
    pub fn remaining_exchanges(&self) -> usize {
        self.exchanges.len()
    }

    /// Number of response lines queued but not yet read
    pub fn pending_lines(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Err(Error::AlreadyConnected);
        }
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        self.pending.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        self.sent.push(line.to_string());

        let exchange = self
            .exchanges
            .pop_front()
            .ok_or_else(|| Error::Script("no more expected exchanges".into()))?;

        if line != exchange.command {
            return Err(Error::Script(format!(
                "unexpected command: expected {:?}, got {:?}",
                exchange.command, line
            )));
        }

        self.pending.extend(exchange.responses);
        self.pending.extend(exchange.unsolicited);
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        // Empty string stands in for a read timeout, as on the real line.
        Ok(self.pending.pop_front().unwrap_or_default())
    }

    async fn bytes_pending(&mut self) -> Result<bool> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        Ok(!self.pending.is_empty())
    }

    fn port_name(&self) -> String {
        "mock".to_string()
    }
}

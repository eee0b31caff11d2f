//! Command/response exchange engine

use tracing::trace;

use ohrust_core::Command;
use ohrust_transport::Transport;

use crate::error::Result;

/// One command/response link to the instrument.
///
/// Enforces the framing contract: one command line out, exactly the
/// command's declared number of response lines back, and nothing further
/// pending afterwards. There is no retry here - one call is one attempt.
pub struct Link {
    transport: Box<dyn Transport>,
}

impl Link {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn connect(&mut self) -> Result<()> {
        self.transport.connect().await?;
        Ok(())
    }

    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await?;
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn port_name(&self) -> String {
        self.transport.port_name()
    }

    /// Send one command and collect its declared response lines.
    ///
    /// After the last expected line is read the channel must be silent;
    /// anything still pending is read back and surfaced as a protocol
    /// violation carrying the unexpected text.
    pub async fn exchange(&mut self, command: &Command) -> Result<Vec<String>> {
        trace!("TX {}", command);
        self.transport.write_line(&command.mnemonic()).await?;

        let mut lines = Vec::with_capacity(command.response_lines());
        for i in 0..command.response_lines() {
            let line = self.transport.read_line().await?;
            trace!("RX ({}) {:?}", i, line);
            lines.push(line);
        }

        if self.transport.bytes_pending().await? {
            let text = self.transport.read_line().await?;
            return Err(ohrust_core::Error::ProtocolViolation { text }.into());
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ohrust_core::DoorState;
    use ohrust_transport::MockTransport;

    fn link_with(mock: MockTransport) -> Link {
        Link::new(Box::new(mock))
    }

    #[tokio::test]
    async fn test_exchange_returns_declared_line_count() {
        let mut mock = MockTransport::new();
        mock.expect("IP", &["12.345 g S", "", "", ""]);

        let mut link = link_with(mock);
        link.connect().await.unwrap();

        let lines = link.exchange(&Command::ImmediateWeight).await.unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "12.345 g S");
    }

    #[tokio::test]
    async fn test_exchange_single_line() {
        let mut mock = MockTransport::new();
        mock.expect("PV", &["1.10"]);

        let mut link = link_with(mock);
        link.connect().await.unwrap();

        let lines = link.exchange(&Command::SoftwareVersion).await.unwrap();
        assert_eq!(lines, vec!["1.10".to_string()]);
    }

    #[tokio::test]
    async fn test_exchange_unsolicited_line_is_violation() {
        let mut mock = MockTransport::new();
        mock.expect_with_unsolicited("Z", &["OK!"], "0.0000 g S");

        let mut link = link_with(mock);
        link.connect().await.unwrap();

        let err = link.exchange(&Command::Zero).await.unwrap_err();
        match err {
            Error::Core(ohrust_core::Error::ProtocolViolation { text }) => {
                assert_eq!(text, "0.0000 g S");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exchange_silence_yields_empty_lines() {
        let mut mock = MockTransport::new();
        mock.expect("T", &[]);

        let mut link = link_with(mock);
        link.connect().await.unwrap();

        // The transport timing out is not an error at this layer.
        let lines = link.exchange(&Command::Tare).await.unwrap();
        assert_eq!(lines, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_exchange_sends_door_frames() {
        let mut mock = MockTransport::new();
        mock.expect("WI 1 1", &["WI A"]);

        let mut link = link_with(mock);
        link.connect().await.unwrap();

        let lines = link
            .exchange(&Command::MoveDoor(DoorState::OpenBoth))
            .await
            .unwrap();
        assert_eq!(lines, vec!["WI A".to_string()]);
    }
}

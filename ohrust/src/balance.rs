//! High-level balance interface

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use ohrust_core::constants::{DEFAULT_DOOR_SETTLE, DEFAULT_STABILIZE_SETTLE};
use ohrust_core::{Command, DoorState};
use ohrust_transport::{SerialTransport, Transport};
use ohrust_types::{BalanceInfo, WeightReading};

use crate::error::{Error, Result};
use crate::link::Link;

/// Ohaus Explorer EX225D/AD semi-micro balance
///
/// The balance acknowledges every actuation command the moment it is
/// accepted, not when the physical action finishes. Door moves, zero and
/// tare therefore hold for a settle window after the acknowledgement;
/// a call returning `Ok` means the action is complete, not merely sent.
///
/// # Examples
///
/// ```no_run
/// use ohrust::Balance;
///
/// #[tokio::main]
/// async fn main() -> ohrust::Result<()> {
///     let mut balance = Balance::new("/dev/ttyUSB0");
///
///     balance.connect().await?;
///
///     let reading = balance.weigh().await?;
///     println!("{}", reading);
///
///     balance.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Balance {
    link: Link,
    info: Option<BalanceInfo>,
    door_settle: Duration,
    stabilize_settle: Duration,
}

impl Balance {
    /// Create a balance on a serial port (9600 baud, 1 s read timeout)
    pub fn new(port: impl Into<String>) -> Self {
        Self::with_transport(Box::new(SerialTransport::new(port)))
    }

    /// Create a balance over a caller-supplied transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            link: Link::new(transport),
            info: None,
            door_settle: DEFAULT_DOOR_SETTLE,
            stabilize_settle: DEFAULT_STABILIZE_SETTLE,
        }
    }

    /// Set the post-move door settle (default 3 s)
    ///
    /// The default is an empirically observed upper bound, not a value
    /// the instrument guarantees.
    pub fn with_door_settle(mut self, settle: Duration) -> Self {
        self.door_settle = settle;
        self
    }

    /// Set the post-zero/tare settle (default 10 s)
    pub fn with_stabilize_settle(mut self, settle: Duration) -> Self {
        self.stabilize_settle = settle;
        self
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.link.is_connected() && self.info.is_some()
    }

    /// Identity captured at connection time
    pub fn info(&self) -> Option<&BalanceInfo> {
        self.info.as_ref()
    }

    /// Connect and capture session identity
    ///
    /// Opens the port, then issues `PV`, `PSN` and `PM` in that fixed
    /// order. If any of the three goes unanswered the port is closed
    /// again and the whole connect fails - a half-initialized balance is
    /// never handed back.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.link.port_name());

        self.link.connect().await?;

        match self.read_identity().await {
            Ok(identity) => {
                info!("Connected to {}", identity);
                self.info = Some(identity);
                Ok(())
            }
            Err(e) => {
                warn!("Identity check failed: {}", e);
                let _ = self.link.disconnect().await;
                Err(e)
            }
        }
    }

    /// Disconnect (idempotent)
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.link.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.link.port_name());

        self.link.disconnect().await?;
        self.info = None;

        info!("Disconnected");
        Ok(())
    }

    /// Move the draftshield door, then wait for the motor to settle.
    pub async fn move_door(&mut self, door: DoorState) -> Result<()> {
        self.ensure_connected()?;

        debug!("Moving door: {}...", door);
        self.actuate(Command::MoveDoor(door), self.door_settle).await?;
        debug!("Door {} done", door);

        Ok(())
    }

    /// Zero the balance, then wait for it to stabilize.
    pub async fn zero(&mut self) -> Result<()> {
        self.ensure_connected()?;

        debug!("Zeroing...");
        self.actuate(Command::Zero, self.stabilize_settle).await?;
        debug!("Zeroed");

        Ok(())
    }

    /// Tare, then wait for the balance to stabilize.
    pub async fn tare(&mut self) -> Result<()> {
        self.ensure_connected()?;

        debug!("Taring...");
        self.actuate(Command::Tare, self.stabilize_settle).await?;
        debug!("Tared");

        Ok(())
    }

    /// Read the immediate weight.
    ///
    /// `IP` answers synchronously with four lines; only the first carries
    /// the value and unit. The reading may be unstable - the instrument
    /// reports whatever the pan shows right now.
    pub async fn weigh(&mut self) -> Result<WeightReading> {
        self.ensure_connected()?;

        let lines = self.link.exchange(&Command::ImmediateWeight).await?;
        let first = lines.first().map(String::as_str).unwrap_or_default();
        let reading = WeightReading::parse(first)?;

        debug!("Weight: {}", reading);
        Ok(reading)
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    async fn read_identity(&mut self) -> Result<BalanceInfo> {
        let software_version = self.query(Command::SoftwareVersion).await?;
        let serial_number = self.query(Command::SerialNumber).await?;
        let operating_mode = self.query(Command::OperatingMode).await?;

        Ok(BalanceInfo::new(
            software_version,
            serial_number,
            operating_mode,
        ))
    }

    /// Single-line query; silence is an error here.
    async fn query(&mut self, command: Command) -> Result<String> {
        let lines = self.link.exchange(&command).await?;
        let line = lines.into_iter().next().unwrap_or_default();

        if line.is_empty() {
            return Err(Error::NoResponse(command.mnemonic()));
        }

        Ok(line)
    }

    /// Send an actuation command, validate its acknowledgement, then hold
    /// for the settle window. On a bad acknowledgement the settle is
    /// skipped and the error surfaces immediately.
    async fn actuate(&mut self, command: Command, settle: Duration) -> Result<()> {
        let lines = self.link.exchange(&command).await?;
        let ack = lines.first().map(String::as_str).unwrap_or_default();

        command.check_ack(ack)?;

        sleep(settle).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohrust_transport::MockTransport;
    use tokio::time::Instant;

    /// Mock pre-loaded with the connect handshake.
    fn connectable_mock() -> MockTransport {
        let mut mock = MockTransport::new();
        mock.expect("PV", &["v1.0"]);
        mock.expect("PSN", &["SN123"]);
        mock.expect("PM", &["g"]);
        mock
    }

    async fn connected_balance(mock: MockTransport) -> Balance {
        let mut balance = Balance::with_transport(Box::new(mock));
        balance.connect().await.unwrap();
        balance
    }

    #[test]
    fn test_balance_create() {
        let balance = Balance::new("/dev/ttyUSB0");
        assert!(!balance.is_connected());
        assert!(balance.info().is_none());
    }

    #[tokio::test]
    async fn test_connect_captures_identity() {
        let balance = connected_balance(connectable_mock()).await;

        assert!(balance.is_connected());
        let info = balance.info().unwrap();
        assert_eq!(info.software_version, "v1.0");
        assert_eq!(info.serial_number, "SN123");
        assert_eq!(info.operating_mode, "g");
    }

    #[tokio::test]
    async fn test_connect_fails_on_silent_identity_query() {
        let mut mock = MockTransport::new();
        mock.expect("PV", &["v1.0"]);
        mock.expect("PSN", &[]); // times out

        let mut balance = Balance::with_transport(Box::new(mock));
        let err = balance.connect().await.unwrap_err();

        assert!(matches!(err, Error::NoResponse(cmd) if cmd == "PSN"));
        assert!(!balance.is_connected());
        assert!(balance.info().is_none());
    }

    #[tokio::test]
    async fn test_operations_require_connect() {
        let mut balance = Balance::new("/dev/ttyUSB0");
        assert!(matches!(balance.weigh().await, Err(Error::NotConnected)));
        assert!(matches!(balance.zero().await, Err(Error::NotConnected)));
        assert!(matches!(
            balance.move_door(DoorState::OpenBoth).await,
            Err(Error::NotConnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_door_holds_for_settle() {
        let mut mock = connectable_mock();
        mock.expect("WI 1 0", &["WI A"]);

        let mut balance = connected_balance(mock).await;

        let before = Instant::now();
        balance.move_door(DoorState::OpenLeft).await.unwrap();

        // Returns only once the full door settle has elapsed.
        assert_eq!(before.elapsed(), DEFAULT_DOOR_SETTLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_holds_for_stabilize_settle() {
        let mut mock = connectable_mock();
        mock.expect("Z", &["OK!"]);

        let mut balance = connected_balance(mock).await;

        let before = Instant::now();
        balance.zero().await.unwrap();

        assert_eq!(before.elapsed(), DEFAULT_STABILIZE_SETTLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_overrides() {
        let mut mock = connectable_mock();
        mock.expect("T", &["OK!"]);

        let mut balance = Balance::with_transport(Box::new(mock))
            .with_stabilize_settle(Duration::from_millis(50));
        balance.connect().await.unwrap();

        let before = Instant::now();
        balance.tare().await.unwrap();

        assert_eq!(before.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ack_mismatch_skips_settle() {
        let mut mock = connectable_mock();
        mock.expect("WI 0 0", &["ES"]);

        let mut balance = connected_balance(mock).await;

        let before = Instant::now();
        let err = balance.move_door(DoorState::CloseBoth).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Core(ohrust_core::Error::AckMismatch { .. })
        ));
        // No settle on failure.
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_requires_ok_token() {
        let mut mock = connectable_mock();
        mock.expect("Z", &["WI A"]);

        let mut balance = connected_balance(mock).await;
        let err = balance.zero().await.unwrap_err();

        match err {
            Error::Core(ohrust_core::Error::AckMismatch {
                command,
                expected,
                actual,
            }) => {
                assert_eq!(command, "Z");
                assert_eq!(expected, "OK!");
                assert_eq!(actual, "WI A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_weigh_parses_first_line() {
        let mut mock = connectable_mock();
        mock.expect("IP", &["12.345 g S", "", "", ""]);

        let mut balance = connected_balance(mock).await;
        let reading = balance.weigh().await.unwrap();

        assert_eq!(reading.value, "12.345");
        assert_eq!(reading.unit, "g");
    }

    #[tokio::test]
    async fn test_weigh_malformed_line() {
        let mut mock = connectable_mock();
        mock.expect("IP", &["", "", "", ""]);

        let mut balance = connected_balance(mock).await;
        let err = balance.weigh().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Types(ohrust_types::Error::MalformedReading(_))
        ));
    }

    #[tokio::test]
    async fn test_weigh_unsolicited_data_is_violation() {
        let mut mock = connectable_mock();
        mock.expect_with_unsolicited("IP", &["12.345 g S", "", "", ""], "extra");

        let mut balance = connected_balance(mock).await;
        let err = balance.weigh().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Core(ohrust_core::Error::ProtocolViolation { text }) if text == "extra"
        ));
    }

    #[tokio::test]
    async fn test_repeated_weigh_leaves_no_state() {
        let mut mock = connectable_mock();
        for _ in 0..1000 {
            mock.expect("IP", &["12.345 g S", "", "", ""]);
        }

        let mut balance = connected_balance(mock).await;

        // Each exchange must consume its reply completely; any leaked
        // pending line would fail the next call as a protocol violation.
        for _ in 0..1000 {
            let reading = balance.weigh().await.unwrap();
            assert_eq!(reading.value, "12.345");
        }
    }

    #[tokio::test]
    async fn test_disconnect_idempotent() {
        let mut balance = connected_balance(connectable_mock()).await;

        balance.disconnect().await.unwrap();
        balance.disconnect().await.unwrap();
        assert!(!balance.is_connected());
    }
}

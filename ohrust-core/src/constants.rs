//! Protocol constants

use std::time::Duration;

/// Command frame terminator
pub const TERMINATOR: &str = "\r\n";

/// Serial line speed the Explorer ships with
pub const DEFAULT_BAUD: u32 = 9600;

/// Default per-line read timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Acknowledgement token for draftshield (`WI`) commands
pub const ACK_WING: &str = "WI A";

/// Acknowledgement token for zero and tare
pub const ACK_READY: &str = "OK!";

/// Default settle after a door move.
///
/// The instrument acknowledges immediately but the motor takes up to ~3 s.
pub const DEFAULT_DOOR_SETTLE: Duration = Duration::from_secs(3);

/// Default settle after zero or tare.
///
/// Empirical upper bound (~10 s); there is no "done" signal to poll.
pub const DEFAULT_STABILIZE_SETTLE: Duration = Duration::from_secs(10);

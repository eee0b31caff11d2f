//! Balance command definitions
//!
//! The Explorer understands a much larger command set; only the commands
//! this driver models are represented here.

use std::fmt;

use crate::constants::{ACK_READY, ACK_WING};
use crate::error::{Error, Result};

/// Draftshield door positions
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DoorState {
    OpenLeft,
    OpenRight,
    OpenBoth,
    CloseBoth,
}

impl DoorState {
    /// Left/right wing selectors as sent on the wire (`WI <left> <right>`)
    fn wings(self) -> (u8, u8) {
        match self {
            Self::OpenLeft => (1, 0),
            Self::OpenRight => (0, 1),
            Self::OpenBoth => (1, 1),
            Self::CloseBoth => (0, 0),
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenLeft => "open-left",
            Self::OpenRight => "open-right",
            Self::OpenBoth => "open-both",
            Self::CloseBoth => "close-both",
        };
        write!(f, "{}", name)
    }
}

/// Balance commands
///
/// Each command knows its wire mnemonic, how many response lines the
/// instrument sends back, and (for actuations) the exact acknowledgement
/// token the single response line must equal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// `PV` - software version
    SoftwareVersion,

    /// `PSN` - serial number
    SerialNumber,

    /// `PM` - current operating mode
    OperatingMode,

    /// `WI <left> <right>` - move the draftshield door
    MoveDoor(DoorState),

    /// `Z` - zero the balance
    Zero,

    /// `T` - tare
    Tare,

    /// `IP` - immediate (possibly unstable) weight, 4 response lines
    ImmediateWeight,
}

impl Command {
    /// Wire mnemonic, without the line terminator
    pub fn mnemonic(&self) -> String {
        match self {
            Self::SoftwareVersion => "PV".into(),
            Self::SerialNumber => "PSN".into(),
            Self::OperatingMode => "PM".into(),
            Self::MoveDoor(door) => {
                let (left, right) = door.wings();
                format!("WI {} {}", left, right)
            }
            Self::Zero => "Z".into(),
            Self::Tare => "T".into(),
            Self::ImmediateWeight => "IP".into(),
        }
    }

    /// Number of response lines the instrument sends for this command
    pub fn response_lines(&self) -> usize {
        match self {
            Self::ImmediateWeight => 4,
            _ => 1,
        }
    }

    /// Required acknowledgement token, if this command actuates the instrument
    pub fn required_ack(&self) -> Option<&'static str> {
        match self {
            Self::MoveDoor(_) => Some(ACK_WING),
            Self::Zero | Self::Tare => Some(ACK_READY),
            _ => None,
        }
    }

    /// Check if this command physically actuates the instrument
    pub fn is_actuation(&self) -> bool {
        self.required_ack().is_some()
    }

    /// Validate an acknowledgement line against this command's required token.
    ///
    /// Queries accept anything; actuations require an exact match.
    pub fn check_ack(&self, line: &str) -> Result<()> {
        match self.required_ack() {
            Some(expected) if line != expected => Err(Error::AckMismatch {
                command: self.mnemonic(),
                expected,
                actual: line.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

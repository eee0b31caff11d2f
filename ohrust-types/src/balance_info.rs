//! Session identity structures

use std::fmt;

/// Identity reported by the balance at connection time
///
/// Captured once during the connect handshake and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceInfo {
    /// Software version (`PV`)
    pub software_version: String,

    /// Serial number (`PSN`)
    pub serial_number: String,

    /// Operating mode at connect time (`PM`)
    pub operating_mode: String,
}

impl BalanceInfo {
    pub fn new(
        software_version: String,
        serial_number: String,
        operating_mode: String,
    ) -> Self {
        Self {
            software_version,
            serial_number,
            operating_mode,
        }
    }
}

impl fmt::Display for BalanceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Balance[SN: {}, SW: {}, mode: {}]",
            self.serial_number, self.software_version, self.operating_mode
        )
    }
}

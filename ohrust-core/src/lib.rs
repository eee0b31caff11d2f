//! # ohrust-core
//!
//! Core protocol definitions for the Ohaus Explorer balance driver:
//! - Command mnemonics and their declared response-line counts
//! - Acknowledgement token validation
//! - Protocol constants (terminator, baud, default settle windows)

pub mod command;
pub mod constants;
pub mod error;

pub use command::{Command, DoorState};
pub use error::{Error, Result};

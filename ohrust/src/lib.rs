//! # ohrust
//!
//! Driver for the Ohaus Explorer EX225D/AD semi-micro balance over a
//! serial line.
//!
//! ## Features
//!
//! - CRLF-framed ASCII command/response protocol with strict framing checks
//! - Acknowledgement validation for door, zero and tare actuations
//! - Settling waits that model the instrument's
//!   accepts-immediately-but-settles-later behavior
//! - Scripted mock transport for hardware-free testing
//!
//! ## Quick Start
//!
//! ```no_run
//! use ohrust::{Balance, DoorState};
//!
//! #[tokio::main]
//! async fn main() -> ohrust::Result<()> {
//!     // Connect to the balance
//!     let mut balance = Balance::new("/dev/ttyUSB0");
//!     balance.connect().await?;
//!
//!     // Load a sample through the left door
//!     balance.move_door(DoorState::OpenLeft).await?;
//!     balance.move_door(DoorState::CloseBoth).await?;
//!
//!     // Read the weight
//!     let reading = balance.weigh().await?;
//!     println!("{}", reading);
//!
//!     balance.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod balance;
pub mod error;
pub mod link;

// Re-exports
pub use balance::Balance;
pub use error::{Error, Result};
pub use link::Link;

// Re-export types
pub use ohrust_core::{Command, DoorState};
pub use ohrust_transport::{MockTransport, SerialTransport, Transport};
pub use ohrust_types::{BalanceInfo, WeightReading};

//! Shared data types for the balance driver

pub mod balance_info;
pub mod error;
pub mod weight;

pub use balance_info::BalanceInfo;
pub use error::{Error, Result};
pub use weight::WeightReading;

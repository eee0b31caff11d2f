//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Core(#[from] ohrust_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] ohrust_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] ohrust_types::Error),

    #[error("Balance not connected")]
    NotConnected,

    #[error("No response to {0}")]
    NoResponse(String),
}

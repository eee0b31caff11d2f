//! Type errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Weight line could not be split into value and unit tokens
    #[error("Malformed weight reading: {0:?}")]
    MalformedReading(String),
}

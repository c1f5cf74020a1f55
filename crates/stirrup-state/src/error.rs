use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("location record is oversized ({size} bytes, limit {limit})")]
    Oversized { size: usize, limit: usize },

    #[error("location record is not valid UTF-8")]
    Malformed,

    #[error("failed to read location record: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write location record: {0}")]
    Write(#[source] std::io::Error),
}

//! Error types for the `tsig-util` crate.

use thiserror::Error;

/// Errors constructing a [`crate::buffer::Buffer`].
#[derive(Debug, Error)]
pub enum BufferError {
    /// The raw bytes did not decode under the declared encoding.
    #[error("buffer is not valid {encoding}: {detail}")]
    InvalidEncoding {
        encoding: &'static str,
        detail: String,
    },
}

pub type BufferResult<T> = std::result::Result<T, BufferError>;

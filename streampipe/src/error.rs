//! Error types for pipe operations.

use std::io;

/// Result type alias for pipe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipe operation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The pipe was constructed with a capacity of zero.
    #[error("streampipe: capacity must be greater than 0")]
    InvalidCapacity,

    /// An offset/count pair does not fit inside the caller's buffer.
    #[error("streampipe: range {offset}+{count} out of bounds for buffer of length {len}")]
    OutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    /// The producer already signaled that writing is finished.
    #[error("streampipe: write finished")]
    WriteFinished,
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::InvalidCapacity | Error::OutOfRange { .. } => io::ErrorKind::InvalidInput,
            Error::WriteFinished => io::ErrorKind::BrokenPipe,
        };
        io::Error::new(kind, e)
    }
}

/// Checks that `offset..offset + count` lies inside a buffer of length `len`.
pub(crate) fn check_range(offset: usize, count: usize, len: usize) -> Result<()> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::OutOfRange { offset, count, len }),
    }
}

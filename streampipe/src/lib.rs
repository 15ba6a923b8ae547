//! Bounded blocking byte pipe.
//!
//! This crate provides [`StreamPipe`], a fixed-capacity circular byte buffer
//! that hands a byte stream from one producer thread to one consumer thread.
//! Memory use never grows past the capacity chosen at construction, and
//! neither side polls: writers park while the pipe is full, readers park
//! while it is empty.
//!
//! # Usage
//!
//! ```
//! use giztoy_streampipe::pipe_with_capacity;
//! use std::io::Read;
//! use std::thread;
//!
//! let (writer, mut reader) = pipe_with_capacity(4).unwrap();
//!
//! let producer = thread::spawn(move || {
//!     writer.write(b"hello, pipe").unwrap();
//!     // Dropping the writer marks the pipe finished.
//! });
//!
//! let mut text = String::new();
//! reader.read_to_string(&mut text).unwrap();
//! producer.join().unwrap();
//! assert_eq!(text, "hello, pipe");
//! ```
//!
//! # End of Stream
//!
//! The producer calls [`StreamPipe::mark_write_finished`] (or drops its
//! [`PipeWriter`]) after its last write. Readers drain what is buffered and
//! then get `0` from every read, without blocking.
//!
//! Writing after the finish signal fails with [`Error::WriteFinished`].
//!
//! # Sequential Only
//!
//! There is no length, position or seek. [`std::io::Seek`] is
//! not implemented and [`StreamPipe::can_seek`] is always false.

mod config;
mod error;
mod handle;
mod io;
mod pipe;

pub use config::{DEFAULT_CAPACITY, PipeConfig};
pub use error::{Error, Result};
pub use handle::{PipeReader, PipeWriter, pipe, pipe_with_capacity};
pub use pipe::StreamPipe;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StreamPipe>();
        assert_send_sync::<PipeWriter>();
        assert_send_sync::<PipeReader>();
    }

    #[test]
    fn test_pipe_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<StreamPipe>();
    }
}

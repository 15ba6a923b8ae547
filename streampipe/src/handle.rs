//! Producer and consumer halves of a [`StreamPipe`].

use crate::error::Result;
use crate::pipe::StreamPipe;

/// The write half of a pipe.
///
/// Dropping the writer marks the pipe as finished, so the reader reaches
/// end of stream even if the producer thread exits early.
#[derive(Debug)]
pub struct PipeWriter {
    pipe: StreamPipe,
}

/// The read half of a pipe.
#[derive(Debug)]
pub struct PipeReader {
    pipe: StreamPipe,
}

/// Creates a pipe with the default capacity and returns both halves.
pub fn pipe() -> (PipeWriter, PipeReader) {
    StreamPipe::default().split()
}

/// Creates a pipe with `capacity` bytes of storage and returns both halves.
pub fn pipe_with_capacity(capacity: usize) -> Result<(PipeWriter, PipeReader)> {
    Ok(StreamPipe::new(capacity)?.split())
}

impl StreamPipe {
    /// Splits the pipe into a write half and a read half.
    pub fn split(self) -> (PipeWriter, PipeReader) {
        let reader = PipeReader { pipe: self.clone() };
        (PipeWriter { pipe: self }, reader)
    }
}

impl PipeWriter {
    /// See [`StreamPipe::write`].
    pub fn write(&self, data: &[u8]) -> Result<()> {
        self.pipe.write(data)
    }

    /// See [`StreamPipe::write_range`].
    pub fn write_range(&self, buf: &[u8], offset: usize, count: usize) -> Result<()> {
        self.pipe.write_range(buf, offset, count)
    }

    /// Marks the write side as finished. Also happens on drop.
    pub fn finish(&self) {
        self.pipe.mark_write_finished();
    }

    /// Returns true until the pipe is finished.
    pub fn can_write(&self) -> bool {
        self.pipe.can_write()
    }

    /// Returns the pipe capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.pipe.capacity()
    }
}

impl Drop for PipeWriter {
    fn drop(&mut self) {
        self.pipe.mark_write_finished();
    }
}

impl PipeReader {
    /// See [`StreamPipe::read`].
    pub fn read(&self, buf: &mut [u8]) -> usize {
        self.pipe.read(buf)
    }

    /// See [`StreamPipe::read_range`].
    pub fn read_range(&self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
        self.pipe.read_range(buf, offset, count)
    }

    /// Returns the number of buffered bytes ready to read.
    pub fn available(&self) -> usize {
        self.pipe.available()
    }

    /// Returns true once writing is finished and everything was read.
    pub fn is_end_of_stream(&self) -> bool {
        self.pipe.is_end_of_stream()
    }

    /// Returns the pipe capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.pipe.capacity()
    }
}

//! Bounded blocking byte pipe.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::config::{DEFAULT_CAPACITY, PipeConfig};
use crate::error::{Error, Result, check_range};

/// A thread-safe bounded byte pipe backed by a ring buffer.
///
/// `StreamPipe` hands bytes from one producer thread to one consumer thread
/// through fixed-size circular storage. Writes block while the storage is
/// full, reads block while it is empty, and the producer signals end of
/// stream with [`mark_write_finished`](Self::mark_write_finished).
///
/// # Semantics
///
/// - **Write**: Blocks when full, returns once every byte is buffered
/// - **Read**: Blocks when empty, returns at most one contiguous run
/// - **Finish**: Readers drain what is left, then see `0` forever
///
/// The pipe is strictly sequential. It has no notion of length or position
/// and does not implement [`std::io::Seek`].
///
/// Cloning shares the underlying storage. Use [`split`](Self::split) to get
/// handles that can only write or only read.
///
/// # Example
///
/// ```
/// use giztoy_streampipe::StreamPipe;
/// use std::thread;
///
/// let pipe = StreamPipe::new(4).unwrap();
/// let producer = pipe.clone();
///
/// let writer = thread::spawn(move || {
///     producer.write(&[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
///     producer.mark_write_finished();
/// });
///
/// let mut out = Vec::new();
/// let mut chunk = [0u8; 3];
/// loop {
///     let n = pipe.read(&mut chunk);
///     if n == 0 {
///         break;
///     }
///     out.extend_from_slice(&chunk[..n]);
/// }
///
/// writer.join().unwrap();
/// assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub struct StreamPipe {
    inner: Arc<PipeInner>,
}

struct PipeInner {
    state: Mutex<PipeState>,
    not_empty: Condvar,
    not_full: Condvar,
}

struct PipeState {
    buf: Box<[u8]>,
    read_pos: usize,
    write_pos: usize,
    available: usize,
    finished: bool,
}

impl PipeState {
    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn is_full(&self) -> bool {
        self.available == self.buf.len()
    }

    /// Copies as much of `data` as fits before the physical end of storage
    /// or the read cursor, whichever comes first.
    fn push(&mut self, data: &[u8]) -> usize {
        let capacity = self.capacity();
        let run = (capacity - self.available)
            .min(capacity - self.write_pos)
            .min(data.len());

        self.buf[self.write_pos..self.write_pos + run].copy_from_slice(&data[..run]);
        self.write_pos = (self.write_pos + run) % capacity;
        self.available += run;
        run
    }

    /// Copies out at most one contiguous run, never crossing the wrap point.
    fn pop(&mut self, out: &mut [u8]) -> usize {
        let capacity = self.capacity();
        let run = self
            .available
            .min(capacity - self.read_pos)
            .min(out.len());

        out[..run].copy_from_slice(&self.buf[self.read_pos..self.read_pos + run]);
        self.read_pos = (self.read_pos + run) % capacity;
        self.available -= run;
        run
    }
}

impl Clone for StreamPipe {
    fn clone(&self) -> Self {
        StreamPipe {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for StreamPipe {
    fn default() -> Self {
        StreamPipe::with_storage(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for StreamPipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("StreamPipe")
            .field("capacity", &state.capacity())
            .field("available", &state.available)
            .field("finished", &state.finished)
            .finish()
    }
}

impl StreamPipe {
    /// Creates a new pipe with the specified capacity in bytes.
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(StreamPipe::with_storage(capacity))
    }

    /// Creates a new pipe from a [`PipeConfig`].
    pub fn from_config(config: &PipeConfig) -> Result<Self> {
        StreamPipe::new(config.capacity)
    }

    fn with_storage(capacity: usize) -> Self {
        debug!("streampipe: created with capacity {}", capacity);
        StreamPipe {
            inner: Arc::new(PipeInner {
                state: Mutex::new(PipeState {
                    buf: vec![0u8; capacity].into_boxed_slice(),
                    read_pos: 0,
                    write_pos: 0,
                    available: 0,
                    finished: false,
                }),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
            }),
        }
    }

    /// Returns the capacity of the ring storage in bytes.
    pub fn capacity(&self) -> usize {
        self.inner.state.lock().capacity()
    }

    /// Returns the number of bytes written but not yet read.
    pub fn available(&self) -> usize {
        self.inner.state.lock().available
    }

    /// Returns true if no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Returns true if the storage is full and a write would block.
    pub fn is_full(&self) -> bool {
        self.inner.state.lock().is_full()
    }

    /// Returns true once [`mark_write_finished`](Self::mark_write_finished) was called.
    pub fn is_finished(&self) -> bool {
        self.inner.state.lock().finished
    }

    /// Returns true if writing is finished and every byte has been read.
    pub fn is_end_of_stream(&self) -> bool {
        let state = self.inner.state.lock();
        state.finished && state.available == 0
    }

    /// Always true: a pipe can always be read from.
    pub fn can_read(&self) -> bool {
        true
    }

    /// Returns true until writing has been marked finished.
    pub fn can_write(&self) -> bool {
        !self.is_finished()
    }

    /// Always false: a pipe is sequential only.
    pub fn can_seek(&self) -> bool {
        false
    }

    /// Writes all of `data` into the pipe.
    ///
    /// Blocks while the storage is full until the reader makes room, and
    /// returns only after every byte has been buffered. Input that straddles
    /// the physical end of the storage is copied in two runs.
    ///
    /// Returns [`Error::WriteFinished`] if writing was already finished, or
    /// was finished while this call waited for room. Bytes buffered before
    /// that point stay readable.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let mut state = self.inner.state.lock();
        let mut written = 0;

        while written < data.len() {
            if state.finished {
                return Err(Error::WriteFinished);
            }
            if state.is_full() {
                trace!("streampipe: full, writer waiting ({} bytes left)", data.len() - written);
                self.inner.not_full.wait(&mut state);
                continue;
            }

            written += state.push(&data[written..]);
            self.inner.not_empty.notify_one();
        }

        Ok(())
    }

    /// Writes `count` bytes of `buf` starting at `offset`.
    ///
    /// Returns [`Error::OutOfRange`] if the range does not fit in `buf`.
    pub fn write_range(&self, buf: &[u8], offset: usize, count: usize) -> Result<()> {
        check_range(offset, count, buf.len())?;
        self.write(&buf[offset..offset + count])
    }

    /// Reads buffered bytes into `buf`, returning how many were copied.
    ///
    /// Blocks while the pipe is empty and writing is not finished. Once data
    /// is available, copies at most one contiguous run: the result may be
    /// smaller than both `buf.len()` and the number of buffered bytes when
    /// the data wraps around the end of the storage.
    ///
    /// Returns 0 only for an empty `buf` or at end of stream, that is once
    /// writing is finished and every byte has been read. End of stream is
    /// reported without blocking, as many times as it is asked for.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }

        let mut state = self.inner.state.lock();

        while state.available == 0 {
            if state.finished {
                return 0;
            }
            trace!("streampipe: empty, reader waiting");
            self.inner.not_empty.wait(&mut state);
        }

        let n = state.pop(buf);
        self.inner.not_full.notify_one();
        n
    }

    /// Reads up to `count` bytes into `buf` starting at `offset`.
    ///
    /// Returns [`Error::OutOfRange`] if the range does not fit in `buf`.
    pub fn read_range(&self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
        check_range(offset, count, buf.len())?;
        Ok(self.read(&mut buf[offset..offset + count]))
    }

    /// Marks the write side as finished.
    ///
    /// Wakes every blocked reader and writer. Readers drain the remaining
    /// bytes and then observe end of stream. Calling this again is a no-op.
    pub fn mark_write_finished(&self) {
        let mut state = self.inner.state.lock();
        if state.finished {
            return;
        }
        state.finished = true;
        debug!("streampipe: write finished with {} bytes buffered", state.available);
        self.inner.not_empty.notify_all();
        self.inner.not_full.notify_all();
    }
}

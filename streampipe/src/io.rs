//! `std::io` adapters.
//!
//! These let generic byte consumers (`BufReader`, `BufWriter`, `io::copy`,
//! text codecs) sit on top of a pipe. `Read` returns `Ok(0)` at end of
//! stream, `Write` always accepts the whole slice, and `flush` does nothing
//! because there is no underlying device.

use std::io::{self, Read, Write};

use crate::handle::{PipeReader, PipeWriter};
use crate::pipe::StreamPipe;

impl Read for &StreamPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(StreamPipe::read(self, buf))
    }
}

impl Read for StreamPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(StreamPipe::read(self, buf))
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(PipeReader::read(self, buf))
    }
}

impl Write for &StreamPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamPipe::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for StreamPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamPipe::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        PipeWriter::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

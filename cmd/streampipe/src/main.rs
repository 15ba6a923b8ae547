//! StreamPipe CLI - copy a byte stream through a bounded pipe.

use std::fs::File;
use std::io::{self, Read, Write};
use std::thread;

use anyhow::{Context, bail};
use clap::Parser;
use giztoy_streampipe::{DEFAULT_CAPACITY, PipeConfig, PipeWriter, StreamPipe};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// StreamPipe CLI - copy a byte stream through a bounded pipe.
///
/// A producer thread reads the input in chunks and writes them into the
/// pipe, while the main thread drains the pipe into the output. Memory use
/// stays at the pipe capacity no matter how large the input is.
#[derive(Parser)]
#[command(name = "streampipe")]
#[command(about = "Copy bytes through a bounded producer/consumer pipe")]
#[command(version)]
pub struct Cli {
    /// Pipe capacity in bytes
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Size of each producer read and write
    #[arg(long, default_value_t = 4096)]
    pub chunk_size: usize,

    /// Input file (default: stdin)
    #[arg(short = 'f', long = "file")]
    pub input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdout carries the data, logs go to stderr.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.chunk_size == 0 {
        bail!("--chunk-size must be greater than 0");
    }

    let config = PipeConfig::with_capacity(cli.capacity);
    let (writer, mut reader) = StreamPipe::from_config(&config)
        .context("invalid --capacity")?
        .split();

    let input: Box<dyn Read + Send> = match &cli.input {
        Some(path) => Box::new(File::open(path).with_context(|| format!("open {}", path))?),
        None => Box::new(io::stdin()),
    };
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("create {}", path))?),
        None => Box::new(io::stdout().lock()),
    };

    let chunk_size = cli.chunk_size;
    let producer = thread::spawn(move || produce(input, writer, chunk_size));

    let received = io::copy(&mut reader, &mut output).context("write output")?;
    output.flush().context("flush output")?;

    let sent = match producer.join() {
        Ok(result) => result?,
        Err(_) => bail!("producer thread panicked"),
    };
    debug!("streampipe: sent {} bytes, received {} bytes", sent, received);

    Ok(())
}

/// Reads `input` in chunks and feeds the pipe. The writer is dropped on
/// return, which marks the pipe finished for the consumer.
fn produce(mut input: Box<dyn Read + Send>, writer: PipeWriter, chunk_size: usize) -> anyhow::Result<u64> {
    let mut chunk = vec![0u8; chunk_size];
    let mut sent = 0u64;

    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read input"),
        };
        writer.write(&chunk[..n])?;
        sent += n as u64;
    }

    writer.finish();
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use giztoy_streampipe::pipe_with_capacity;
    use std::io::Cursor;

    #[test]
    fn test_produce_feeds_pipe_and_finishes() {
        let data: Vec<u8> = (0..10).collect();
        let (writer, mut reader) = pipe_with_capacity(64).unwrap();

        let sent = produce(Box::new(Cursor::new(data.clone())), writer, 3).unwrap();
        assert_eq!(sent, 10);
        assert_eq!(reader.available(), 10);

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
        assert!(reader.is_end_of_stream());
    }

    #[test]
    fn test_produce_across_threads() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let (writer, mut reader) = pipe_with_capacity(4).unwrap();

        let input = Box::new(Cursor::new(data.clone()));
        let producer = thread::spawn(move || produce(input, writer, 7));

        let mut out = Vec::new();
        io::copy(&mut reader, &mut out).unwrap();

        assert_eq!(producer.join().unwrap().unwrap(), 1000);
        assert_eq!(out, data);
    }
}

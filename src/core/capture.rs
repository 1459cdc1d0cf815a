//! Standard output/error interception
//!
//! A [`CapturedStream`] stands in for stdout or stderr. Every non-blank chunk
//! written to it is echoed once to the original stream and recorded once as
//! an INFO record on the shared source. The echo is unconditional; the
//! persisted copy is still subject to the file sink's threshold, and console
//! sinks skip captured records so the terminal never shows the text twice.
//!
//! A multi-byte character split across two writes is held back until its
//! remaining bytes arrive. Invalid bytes are replaced with U+FFFD.

use super::logger::LogSource;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};

pub struct CapturedStream<W: Write> {
    original: W,
    source: LogSource,
    /// Leading bytes of an incomplete UTF-8 sequence from the last write
    pending: Vec<u8>,
}

impl<W: Write> CapturedStream<W> {
    pub fn new(original: W, source: LogSource) -> Self {
        Self {
            original,
            source,
            pending: Vec::new(),
        }
    }

    pub fn source(&self) -> &LogSource {
        &self.source
    }

    pub fn into_inner(self) -> W {
        self.original
    }
}

impl<W: Write> Write for CapturedStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(buf);

        let complete = match std::str::from_utf8(&bytes) {
            Ok(_) => bytes.len(),
            // Truncated sequence at the end: keep it for the next write
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => bytes.len(),
        };
        self.pending = bytes.split_off(complete);

        let text = String::from_utf8_lossy(&bytes);
        let text = text.trim_end();
        if text.is_empty() {
            return Ok(buf.len());
        }

        self.original.write_all(text.as_bytes())?;
        self.original.write_all(b"\n")?;
        self.original.flush()?;

        self.source.captured(text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.original.flush()
    }

    /// Format the whole `write!` call into one chunk so it becomes one record
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match args.as_str() {
            Some(s) => self.write_all(s.as_bytes()),
            None => self.write_all(args.to_string().as_bytes()),
        }
    }
}

/// Lock-per-call `Write` handle on a shared [`CapturedStream`]
pub struct StreamHandle<'a> {
    stream: &'a Mutex<CapturedStream<Box<dyn Write + Send>>>,
}

impl<'a> StreamHandle<'a> {
    pub(crate) fn new(stream: &'a Mutex<CapturedStream<Box<dyn Write + Send>>>) -> Self {
        Self { stream }
    }
}

impl Write for StreamHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.lock().flush()
    }

    // Format before locking: a Display impl may print to this same stream
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let text = fmt::format(args);
        self.stream.lock().write_all(text.as_bytes())
    }
}

impl<'a> StreamHandle<'a> {
    /// Write without waiting for the stream lock. Used from the panic hook,
    /// which may fire while this thread already holds it.
    pub(crate) fn try_write_str(&self, text: &str) -> Option<io::Result<()>> {
        self.stream
            .try_lock()
            .map(|mut stream| stream.write_all(text.as_bytes()))
    }
}

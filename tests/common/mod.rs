//! Shared helpers for integration tests

#![allow(dead_code)]

use laplace_logger::Streams;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// In-memory terminal stand-in
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("buffer holds UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(String::from).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console, stdout and stderr buffers plus the `Streams` wired to them
pub struct Terminal {
    pub console: SharedBuffer,
    pub stdout: SharedBuffer,
    pub stderr: SharedBuffer,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            console: SharedBuffer::default(),
            stdout: SharedBuffer::default(),
            stderr: SharedBuffer::default(),
        }
    }

    pub fn streams(&self) -> Streams {
        Streams {
            console: Box::new(self.console.clone()),
            stdout: Box::new(self.stdout.clone()),
            stderr: Box::new(self.stderr.clone()),
        }
    }
}

/// Lines of `content` whose message part is exactly `[LEVEL] [source] message`
pub fn count_records(content: &str, level: &str, source: &str, message: &str) -> usize {
    let suffix = format!("[{}] [{}] {}", level, source, message);
    content.lines().filter(|line| line.ends_with(&suffix)).count()
}

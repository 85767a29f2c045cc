//! Writing response bodies to stdout.

use std::io::{self, Write};

/// Writes body chunks unchanged and remembers whether the last byte was a
/// newline, so `finish` can add one only when it is missing.
pub struct BodyWriter<W> {
    inner: W,
    written: u64,
    ends_with_newline: bool,
}

impl<W: Write> BodyWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            ends_with_newline: false,
        }
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let Some(&last) = chunk.last() else {
            return Ok(());
        };
        self.inner.write_all(chunk)?;
        self.written += chunk.len() as u64;
        self.ends_with_newline = last == b'\n';
        Ok(())
    }

    /// Body bytes written so far, excluding the newline `finish` may add.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(mut self) -> io::Result<u64> {
        if !self.ends_with_newline {
            self.inner.write_all(b"\n")?;
        }
        self.inner.flush()?;
        Ok(self.written)
    }
}

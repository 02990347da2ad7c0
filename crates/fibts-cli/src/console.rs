//! Console writer that keeps line endings intact while raw mode is on.

use std::io::{self, Write};

/// Wraps stdout. In raw mode the terminal no longer maps `\n` to `\r\n`,
/// so this does it instead.
pub struct Console<W: Write> {
    inner: W,
    raw: bool,
}

impl<W: Write> Console<W> {
    pub fn new(inner: W, raw: bool) -> Self {
        Self { inner, raw }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for Console<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.raw {
            return self.inner.write(buf);
        }
        let mut segments = buf.split(|&b| b == b'\n').peekable();
        while let Some(segment) = segments.next() {
            self.inner.write_all(segment)?;
            if segments.peek().is_some() {
                self.inner.write_all(b"\r\n")?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

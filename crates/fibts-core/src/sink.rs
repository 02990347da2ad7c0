//! Line-oriented file output with batched flushing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// When buffered lines are pushed to the underlying file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush after every `n` lines.
    Batched(usize),
    /// Flush after each line.
    EveryLine,
}

/// Builds the output path `{base}_output.txt`.
pub fn output_path(base: &str) -> PathBuf {
    PathBuf::from(format!("{base}_output.txt"))
}

/// Buffered line writer owned by a single run loop.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: BufWriter<W>,
    policy: FlushPolicy,
    lines_written: u64,
}

impl LineSink<File> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path, policy: FlushPolicy) -> io::Result<Self> {
        let file = File::create(path)?;
        info!("Writing output to {}", path.display());
        Ok(Self::new(file, policy))
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(inner: W, policy: FlushPolicy) -> Self {
        Self {
            writer: BufWriter::new(inner),
            policy,
            lines_written: 0,
        }
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Appends one line. Returns `true` when a batch boundary was reached
    /// and the buffer was flushed.
    ///
    /// # Errors
    ///
    /// Any write or flush error from the underlying writer. The line count
    /// only moves once the line is in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use fibts_core::{FlushPolicy, LineSink};
    ///
    /// let mut sink = LineSink::new(Vec::new(), FlushPolicy::Batched(2));
    /// assert!(!sink.write_line("Fibonacci: 1")?);
    /// assert!(sink.write_line("Fibonacci: 2")?);
    ///
    /// assert_eq!(sink.lines_written(), 2);
    ///
    /// let bytes = sink.close()?;
    /// assert!(bytes.starts_with(b"Fibonacci: 1"));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_line(&mut self, line: &str) -> io::Result<bool> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(LINE_ENDING.as_bytes())?;
        self.lines_written += 1;

        match self.policy {
            FlushPolicy::EveryLine => {
                self.writer.flush()?;
                Ok(false)
            }
            FlushPolicy::Batched(n) if n > 0 && self.lines_written % n as u64 == 0 => {
                self.writer.flush()?;
                debug!(lines = self.lines_written, "flushed batch");
                Ok(true)
            }
            FlushPolicy::Batched(_) => Ok(false),
        }
    }

    /// Flushes what is left and hands back the inner writer.
    pub fn close(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("Fibonacci_Output"), PathBuf::from("Fibonacci_Output_output.txt"));
    }

    #[test]
    fn test_batched_flush_reports_boundary() {
        let mut sink = LineSink::new(Vec::new(), FlushPolicy::Batched(3));
        let flushed: Vec<bool> = (0..7)
            .map(|i| sink.write_line(&format!("line {i}")).unwrap())
            .collect();
        assert_eq!(flushed, vec![false, false, true, false, false, true, false]);
        assert_eq!(sink.lines_written(), 7);
    }

    #[test]
    fn test_close_releases_buffer() {
        let mut sink = LineSink::new(Vec::new(), FlushPolicy::Batched(10));
        sink.write_line("a").unwrap();
        sink.write_line("b").unwrap();
        let bytes = sink.close().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_batch_is_on_disk_before_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch_output.txt");
        let mut sink = LineSink::create(&path, FlushPolicy::Batched(10)).unwrap();

        for i in 0..9 {
            assert!(!sink.write_line(&format!("Fibonacci: {i}")).unwrap());
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        assert!(sink.write_line("Fibonacci: 9").unwrap());
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk.lines().count(), 10);
    }

    #[test]
    fn test_every_line_policy_hits_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_output.txt");
        let mut sink = LineSink::create(&path, FlushPolicy::EveryLine).unwrap();

        sink.write_line("first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }
}

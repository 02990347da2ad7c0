use std::io;

use thiserror::Error;

/// Failures that end a run loop.
#[derive(Debug, Error)]
pub enum RunError {
    /// Writing or flushing the output file failed.
    #[error("{0}")]
    Sink(#[source] io::Error),

    /// Writing to the console failed.
    #[error("console write failed: {0}")]
    Console(#[source] io::Error),
}

impl RunError {
    /// True for failures of the output file.
    pub fn is_file_error(&self) -> bool {
        matches!(self, RunError::Sink(_))
    }
}

pub type Result<T> = std::result::Result<T, RunError>;

//! Fibonacci generation, presentation and digit scanning.
//!
//! - `sequence`: the unbounded recurrence as an immutable state record
//! - `mode`: plain and daytime formatting, mode selection
//! - `daytime`: term-as-seconds conversion with an overflow sentinel
//! - `scanner`: leftmost-substring scan with trailing-digit capture
//! - `sink`: buffered line output with batched flushing
//! - `stop`: the cooperative stop-signal capability
//! - `runner`: the run loops tying it together

pub mod daytime;
pub mod error;
pub mod mode;
pub mod runner;
pub mod scanner;
pub mod sequence;
pub mod sink;
pub mod stop;

pub use daytime::{daytime, Daytime, OVERFLOW_SENTINEL};
pub use error::RunError;
pub use mode::{LineFormat, Mode};
pub use runner::{run, RunOptions, RunSummary, StopReason, STOPPING_BANNER};
pub use scanner::{following_digits, ScanMatch, SubstringScanner};
pub use sequence::{next, SequenceState, Term, Terms};
pub use sink::{output_path, FlushPolicy, LineSink};
pub use stop::{Either, NeverStop, StopAfter, StopSignal};

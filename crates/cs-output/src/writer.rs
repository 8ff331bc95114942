//! The `OutputWriter` trait implemented by the file backends.

use crate::{EventRow, OutputResult, ResultRow};

/// Implemented by the CSV and SQLite writers.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver], errors
/// are stored and surfaced by its `finish`.
pub trait OutputWriter {
    /// Append a batch of lifecycle events, in the order given.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write the final per-truck results.
    fn write_results(&mut self, rows: &[ResultRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

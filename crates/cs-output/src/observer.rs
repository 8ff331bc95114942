//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cs_core::{LifecycleEvent, SimTime};
use cs_engine::SimObserver;
use cs_model::RunReport;

use crate::row::{EventRow, ResultRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Events are handed to the writer in batches of this many rows.
const EVENT_BATCH: usize = 4096;

/// A [`SimObserver`] that streams lifecycle events to any [`OutputWriter`]
/// backend and writes the results table once the run is over.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  They surface from [`finish`][Self::finish], or
/// earlier through [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:    Vec::with_capacity(EVENT_BATCH),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes so far succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write the results of `report` and close the writer.
    ///
    /// Fails with the first error stored during the run, if any, before
    /// writing anything further.
    pub fn finish(&mut self, report: &RunReport) -> OutputResult<()> {
        self.flush_events();
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.write_results(&ResultRow::from_results(&report.results))?;
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, event: &LifecycleEvent) {
        self.pending.push(EventRow::from(event));
        if self.pending.len() >= EVENT_BATCH {
            self.flush_events();
        }
    }

    fn on_sim_end(&mut self, _final_time: SimTime) {
        self.flush_events();
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `results.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, ResultRow};

/// Writes run output to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    results:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["time", "entity", "kind", "value"])?;

        let mut results = Writer::from_path(dir.join("results.csv"))?;
        results.write_record(["truck", "total_time", "stops_at_red", "total_red_wait"])?;

        Ok(Self {
            events,
            results,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.time.to_string(),
                row.entity.clone(),
                row.kind.to_owned(),
                row.value.map(|v| v.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_results(&mut self, rows: &[ResultRow]) -> OutputResult<()> {
        for row in rows {
            self.results.write_record(&[
                row.truck.clone(),
                row.total_time.to_string(),
                row.stops_at_red.to_string(),
                row.total_red_wait.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.results.flush()?;
        Ok(())
    }
}

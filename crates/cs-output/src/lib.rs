//! `cs-output` — presentation and export for crossing_sim runs.
//!
//! | Feature   | Backend  | Files created                  |
//! |-----------|----------|--------------------------------|
//! | *(none)*  | CSV      | `events.csv`, `results.csv`    |
//! | `sqlite`  | SQLite   | `output.db`                    |
//!
//! File backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`].  [`ConsoleReporter`] prints the run as it happens,
//! and [`print_summary`] prints the per-truck table afterwards.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{ConsoleReporter, CsvWriter, SimOutputObserver, print_summary};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = (ConsoleReporter::stdout(), SimOutputObserver::new(writer));
//! sim.run(&mut obs)?;
//! let report = sim.into_report();
//! obs.1.finish(&report)?;
//! print_summary(&mut std::io::stdout(), &report)?;
//! ```

pub mod console;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use console::{ConsoleReporter, print_summary};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EventRow, ResultRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

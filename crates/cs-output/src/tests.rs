//! Integration tests for cs-output.

use cs_core::{LoadTimeSampling, SimConfig};
use cs_engine::EventRecorder;
use cs_model::{RunReport, SimBuilder};

/// One truck, one round trip, fixed load time.
fn single_truck(load: f64) -> SimConfig {
    SimConfig {
        truck_count:        1,
        load_unload_range:  [load, load],
        round_trips:        1,
        random_seed:        Some(1),
        load_time_sampling: LoadTimeSampling::WholeMinutes,
        ..SimConfig::default()
    }
}

fn run(config: SimConfig) -> (EventRecorder, RunReport) {
    let mut sim = SimBuilder::new(config).build().unwrap();
    let mut rec = EventRecorder::new();
    sim.run(&mut rec).unwrap();
    (rec, sim.into_report())
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{EventRow, ResultRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("results.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["time", "entity", "kind", "value"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("results.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["truck", "total_time", "stops_at_red", "total_red_wait"]);
    }

    #[test]
    fn csv_event_without_value_is_blank() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { time: 0.0, entity: "LKW-1".into(), kind: "started", value: None },
            EventRow { time: 57.0, entity: "LKW-1".into(), kind: "waiting_at_red", value: Some(2.5) },
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = read(&dir, "events.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[1][0], "57");
        assert_eq!(&rows[1][2], "waiting_at_red");
        assert_eq!(&rows[1][3], "2.5");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.write_results(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        let (_, expected) = run(single_truck(31.0));

        let mut sim = SimBuilder::new(single_truck(31.0)).build().unwrap();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        let report = sim.into_report();
        obs.finish(&report).unwrap();
        assert_eq!(report, expected);

        let events = read(&dir, "events.csv");
        let truck_kinds: Vec<&str> =
            events.iter().filter(|r| &r[1] == "LKW-1").map(|r| r.get(2).unwrap()).collect();
        assert_eq!(truck_kinds.first(), Some(&"started"));
        assert_eq!(truck_kinds.last(), Some(&"finished"));
        assert_eq!(truck_kinds.iter().filter(|k| **k == "waiting_at_red").count(), 1);
        assert!(events.iter().any(|r| &r[1] == "signal"));
        let times: Vec<f64> = events.iter().map(|r| r[0].parse().unwrap()).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));

        let results = read(&dir, "results.csv");
        assert_eq!(results.len(), 1);
        assert_eq!(&results[0][0], "LKW-1");
        assert_eq!(&results[0][1], "138");
        assert_eq!(&results[0][2], "1");
        assert_eq!(&results[0][3], "4");
    }

    #[test]
    fn result_rows_in_truck_order() {
        let config = SimConfig {
            truck_count:        5,
            simulation_horizon: 5_000.0,
            random_seed:        Some(3),
            ..SimConfig::default()
        };
        let (_, report) = run(config);
        let rows = ResultRow::from_results(&report.results);
        let labels: Vec<&str> = rows.iter().map(|r| r.truck.as_str()).collect();
        assert_eq!(labels, ["LKW-1", "LKW-2", "LKW-3", "LKW-4", "LKW-5"]);
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use cs_engine::SimObserver;

    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::row::{EventRow, ResultRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Accepts results but fails every event batch.
    #[derive(Default)]
    struct Broken {
        results_written: bool,
    }

    impl OutputWriter for Broken {
        fn write_events(&mut self, _rows: &[EventRow]) -> OutputResult<()> {
            Err(OutputError::Io(io::Error::other("disk full")))
        }

        fn write_results(&mut self, _rows: &[ResultRow]) -> OutputResult<()> {
            self.results_written = true;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_surfaces_from_finish() {
        let (rec, report) = run(single_truck(30.0));
        let mut obs = SimOutputObserver::new(Broken::default());
        for event in &rec.events {
            obs.on_event(event);
        }
        obs.on_sim_end(report.final_time);

        let err = obs.finish(&report).unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
        assert!(!obs.into_writer().results_written);
    }

    #[test]
    fn take_error_clears() {
        let (rec, report) = run(single_truck(30.0));
        let mut obs = SimOutputObserver::new(Broken::default());
        obs.on_event(&rec.events[0]);
        obs.on_sim_end(report.final_time);
        assert!(obs.take_error().is_some());
        assert!(obs.take_error().is_none());
    }
}

// ── Console tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod console_tests {
    use super::*;
    use crate::console::{ConsoleReporter, describe, print_summary};

    fn narrate(config: SimConfig, show_signal: bool) -> (String, RunReport) {
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut console = ConsoleReporter::new(Vec::new()).with_signal(show_signal);
        sim.run(&mut console).unwrap();
        assert!(console.take_error().is_none());
        let text = String::from_utf8(console.into_inner()).unwrap();
        (text, sim.into_report())
    }

    #[test]
    fn truck_narration() {
        let (text, _) = narrate(single_truck(31.0), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "LKW-1 starts at 0 minutes.",
                "LKW-1 gets loaded.",
                "LKW-1 drives to storage B.",
                "LKW-1 continues at green traffic light.",
                "LKW-1 arrived at storage B and gets unloaded",
                "LKW-1 drives back to storage A.",
                "LKW-1 waits at red light for 4 minutes.",
                "LKW-1 continues at green traffic light.",
                "LKW-1 arrived at storage A",
                "LKW-1 ended its transports in 138 minutes.",
            ]
        );
    }

    #[test]
    fn signal_lines_opt_in() {
        let (text, _) = narrate(single_truck(31.0), true);
        let first: Vec<&str> = text.lines().take(3).collect();
        assert_eq!(first[0], "[0] traffic light turns green.");
        assert!(text.contains("[3] traffic light turns red until 8."));
    }

    #[test]
    fn unloading_is_folded_into_arrival() {
        let (rec, _) = run(single_truck(30.0));
        let unloading = rec
            .events
            .iter()
            .find(|e| e.kind.name() == "unloading")
            .unwrap();
        assert_eq!(describe(unloading), None);
    }

    #[test]
    fn summary_all_delivered() {
        let (_, report) = narrate(single_truck(31.0), false);
        let mut out = Vec::new();
        print_summary(&mut out, &report).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LKW-1: Total time: 138 minutes, Amount of stops at red lights: 1, \
             Total time waited at red lights: 4 minutes\n\
             All trucks delivered successfully.\n"
        );
    }

    #[test]
    fn summary_not_all_delivered() {
        let config = SimConfig { simulation_horizon: 100.0, ..single_truck(30.0) };
        let (_, report) = narrate(config, false);
        let mut out = Vec::new();
        print_summary(&mut out, &report).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Not all trucks delivered successfully.\n");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::row::{EventRow, ResultRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_null_value_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_events(&[EventRow { time: 0.0, entity: "signal".into(), kind: "signal_green", value: None }])
            .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let value: Option<f64> = conn
            .query_row("SELECT value FROM events WHERE kind = 'signal_green'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn sqlite_results() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_results(&[ResultRow {
            truck:          "LKW-2".into(),
            total_time:     401.0,
            stops_at_red:   3,
            total_red_wait: 9.0,
        }])
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (total, stops, wait): (f64, i64, f64) = conn
            .query_row(
                "SELECT total_time, stops_at_red, total_red_wait FROM results WHERE truck = 'LKW-2'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((total, stops, wait), (401.0, 3, 9.0));
    }

    #[test]
    fn integration_sqlite() {
        let (rec, _) = run(single_truck(30.0));

        let mut sim = SimBuilder::new(single_truck(30.0)).build().unwrap();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        obs.finish(&sim.into_report()).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let events: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0)).unwrap();
        let results: i64 = conn.query_row("SELECT COUNT(*) FROM results", [], |r| r.get(0)).unwrap();
        assert_eq!(events as usize, rec.events.len());
        assert_eq!(results, 1);
    }
}

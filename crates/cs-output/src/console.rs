//! Human-readable run narration and the end-of-run summary.

use std::io::{self, Stdout, Write};

use cs_core::{EventKind, LifecycleEvent, SimTime};
use cs_engine::SimObserver;
use cs_model::RunReport;

/// Prints one line per truck event as the run progresses.
///
/// Signal transitions are skipped unless enabled with
/// [`with_signal`][Self::with_signal].  Write errors are kept (first one
/// only) and can be collected with [`take_error`][Self::take_error].
pub struct ConsoleReporter<Out: Write> {
    out:         Out,
    show_signal: bool,
    error:       Option<io::Error>,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<Out: Write> ConsoleReporter<Out> {
    pub fn new(out: Out) -> Self {
        Self { out, show_signal: false, error: None }
    }

    pub fn with_signal(mut self, show: bool) -> Self {
        self.show_signal = show;
        self
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> Out {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}") {
            self.error = Some(e);
        }
    }
}

impl<Out: Write> SimObserver for ConsoleReporter<Out> {
    fn on_event(&mut self, event: &LifecycleEvent) {
        let is_signal = matches!(event.kind, EventKind::SignalGreen | EventKind::SignalRed { .. });
        if is_signal && !self.show_signal {
            return;
        }
        if let Some(line) = describe(event) {
            self.write_line(&line);
        }
    }

    fn on_sim_end(&mut self, _final_time: SimTime) {
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                self.error = Some(e);
            }
        }
    }
}

/// The narration line for `event`, or `None` for events that are folded
/// into a neighbouring line (unloading is announced on arrival).
pub fn describe(event: &LifecycleEvent) -> Option<String> {
    let name = &event.entity;
    let line = match event.kind {
        EventKind::Started => format!("{name} starts at {} minutes.", event.time),
        EventKind::Loading { .. } => format!("{name} gets loaded."),
        EventKind::DepartedOrigin => format!("{name} drives to storage B."),
        EventKind::PassedGreen { .. } => format!("{name} continues at green traffic light."),
        EventKind::WaitingAtRed { wait, .. } => {
            format!("{name} waits at red light for {wait} minutes.")
        }
        EventKind::ArrivedDestination => format!("{name} arrived at storage B and gets unloaded"),
        EventKind::Unloading { .. } => return None,
        EventKind::DepartedDestination => format!("{name} drives back to storage A."),
        EventKind::ArrivedOrigin { .. } => format!("{name} arrived at storage A"),
        EventKind::Finished { total_time } => {
            format!("{name} ended its transports in {total_time} minutes.")
        }
        EventKind::SignalGreen => format!("[{}] traffic light turns green.", event.time),
        EventKind::SignalRed { next_green } => {
            format!("[{}] traffic light turns red until {next_green}.", event.time)
        }
    };
    Some(line)
}

/// Print the per-truck results table and the delivery verdict.
pub fn print_summary<Out: Write>(out: &mut Out, report: &RunReport) -> io::Result<()> {
    for (id, r) in report.results.iter() {
        writeln!(
            out,
            "{}: Total time: {} minutes, Amount of stops at red lights: {}, \
             Total time waited at red lights: {} minutes",
            id.label(),
            r.total_time,
            r.stops_at_red,
            r.total_red_wait,
        )?;
    }
    if report.all_delivered() {
        writeln!(out, "All trucks delivered successfully.")?;
    } else {
        writeln!(out, "Not all trucks delivered successfully.")?;
    }
    out.flush()
}

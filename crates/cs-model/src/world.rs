//! State shared by all processes of one run.

use crate::{ResultsMap, TrafficSignal};

/// The world handed to every process by the scheduler.
///
/// Only [`SignalProcess`][crate::SignalProcess] writes `signal`; trucks read
/// it.  Each truck writes only its own entry of `results`.  The scheduler
/// lends the world to one process at a time, so neither field needs
/// synchronisation.
#[derive(Clone, Debug, Default)]
pub struct Crossing {
    pub signal:  TrafficSignal,
    pub results: ResultsMap,
}

impl Crossing {
    pub fn new() -> Self {
        Self::default()
    }
}

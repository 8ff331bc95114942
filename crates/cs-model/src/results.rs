//! Per-truck results, written once when a truck finishes its last trip.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use cs_core::TruckId;
use tracing::warn;

/// Final record of one truck.  Times are in minutes.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckResult {
    /// From the truck's start to its return after the last round trip.
    pub total_time:     f64,
    /// Times the truck found the signal red, counting every re-check.
    pub stops_at_red:   u32,
    /// Sum of all red-light waits.
    pub total_red_wait: f64,
}

/// Truck id → final result.  Ordered by id so reports are deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsMap {
    inner: BTreeMap<TruckId, TruckResult>,
}

impl ResultsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` for `truck`.
    ///
    /// Entries are write-once: a second write for the same truck is refused
    /// and `false` is returned.
    pub fn record(&mut self, truck: TruckId, result: TruckResult) -> bool {
        match self.inner.entry(truck) {
            Entry::Vacant(slot) => {
                slot.insert(result);
                true
            }
            Entry::Occupied(_) => {
                warn!(%truck, "result already recorded; ignoring second write");
                false
            }
        }
    }

    pub fn get(&self, truck: TruckId) -> Option<&TruckResult> {
        self.inner.get(&truck)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TruckId, &TruckResult)> + '_ {
        self.inner.iter().map(|(&id, r)| (id, r))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `true` iff every one of `expected` trucks recorded a result.
    pub fn all_delivered(&self, expected: usize) -> bool {
        self.inner.len() == expected
    }

    pub fn summary(&self) -> ResultsSummary {
        let n = self.inner.len();
        let mut total_time = 0.0;
        let mut red_wait = 0.0;
        let mut stops = 0u64;
        let mut max_total_time: Option<f64> = None;

        for r in self.inner.values() {
            total_time += r.total_time;
            red_wait += r.total_red_wait;
            stops += r.stops_at_red as u64;
            max_total_time = Some(max_total_time.map_or(r.total_time, |m| m.max(r.total_time)));
        }

        let mean = |sum: f64| (n > 0).then(|| sum / n as f64);
        ResultsSummary {
            delivered:       n,
            total_stops:     stops,
            mean_total_time: mean(total_time),
            mean_red_wait:   mean(red_wait),
            max_total_time,
        }
    }
}

/// Fleet-level aggregates over the recorded results.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ResultsSummary {
    pub delivered:       usize,
    pub total_stops:     u64,
    pub mean_total_time: Option<f64>,
    pub mean_red_wait:   Option<f64>,
    pub max_total_time:  Option<f64>,
}

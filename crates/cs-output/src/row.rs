//! Plain data row types written by output backends.

use cs_core::LifecycleEvent;
use cs_model::ResultsMap;

/// One lifecycle event, flattened for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    /// Clock reading in minutes.
    pub time:   f64,
    /// `"signal"` or the truck label (`"LKW-1"`, …).
    pub entity: String,
    pub kind:   &'static str,
    /// Duration, wait, trip number or next-green time, depending on `kind`.
    pub value:  Option<f64>,
}

impl From<&LifecycleEvent> for EventRow {
    fn from(event: &LifecycleEvent) -> Self {
        Self {
            time:   event.time.minutes(),
            entity: event.entity.to_string(),
            kind:   event.kind.name(),
            value:  event.kind.value(),
        }
    }
}

/// Final result of one truck.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub truck:          String,
    pub total_time:     f64,
    pub stops_at_red:   u32,
    pub total_red_wait: f64,
}

impl ResultRow {
    /// One row per finished truck, in truck-id order.
    pub fn from_results(results: &ResultsMap) -> Vec<ResultRow> {
        results
            .iter()
            .map(|(id, r)| ResultRow {
                truck:          id.label(),
                total_time:     r.total_time,
                stops_at_red:   r.stops_at_red,
                total_red_wait: r.total_red_wait,
            })
            .collect()
    }
}

//! Observer trait for progress reporting and data collection.

use cs_core::{LifecycleEvent, SimTime};

use crate::Event;

/// Callbacks invoked by [`Scheduler::run`][crate::Scheduler::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, event: &LifecycleEvent) {
///         println!("{event}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per lifecycle event, in emission order.
    fn on_event(&mut self, _event: &LifecycleEvent) {}

    /// Called after each wake-up has been delivered and its process resumed.
    fn on_delivery(&mut self, _event: &Event) {}

    /// Called once after the last delivery.
    fn on_sim_end(&mut self, _final_time: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every lifecycle event and delivery time.  Handy for tests and for
/// comparing two runs.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct EventRecorder {
    pub events:     Vec<LifecycleEvent>,
    pub deliveries: Vec<SimTime>,
    pub final_time: Option<SimTime>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for EventRecorder {
    fn on_event(&mut self, event: &LifecycleEvent) {
        self.events.push(*event);
    }

    fn on_delivery(&mut self, event: &Event) {
        self.deliveries.push(event.due());
    }

    fn on_sim_end(&mut self, final_time: SimTime) {
        self.final_time = Some(final_time);
    }
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_event(&mut self, event: &LifecycleEvent) {
        (**self).on_event(event);
    }

    fn on_delivery(&mut self, event: &Event) {
        (**self).on_delivery(event);
    }

    fn on_sim_end(&mut self, final_time: SimTime) {
        (**self).on_sim_end(final_time);
    }
}

/// `None` observes nothing.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_event(&mut self, event: &LifecycleEvent) {
        if let Some(o) = self {
            o.on_event(event);
        }
    }

    fn on_delivery(&mut self, event: &Event) {
        if let Some(o) = self {
            o.on_delivery(event);
        }
    }

    fn on_sim_end(&mut self, final_time: SimTime) {
        if let Some(o) = self {
            o.on_sim_end(final_time);
        }
    }
}

/// Fan out to two observers, `A` first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_event(&mut self, event: &LifecycleEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_delivery(&mut self, event: &Event) {
        self.0.on_delivery(event);
        self.1.on_delivery(event);
    }

    fn on_sim_end(&mut self, final_time: SimTime) {
        self.0.on_sim_end(final_time);
        self.1.on_sim_end(final_time);
    }
}

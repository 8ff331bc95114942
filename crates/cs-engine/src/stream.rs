//! `EventStream` — pull-based view of a run's lifecycle events.

use cs_core::LifecycleEvent;

use crate::{EngineError, EngineResult, Scheduler};

/// Iterator returned by [`Scheduler::events`].
///
/// Nothing is simulated until `next` is called; each call delivers wake-ups
/// until at least one lifecycle event is available.  The stream ends when the
/// horizon is reached or no process is left.  If a delivery fails, the events
/// emitted before the failure are yielded first, then the error, then `None`
/// forever.
pub struct EventStream<'s, W> {
    scheduler: &'s mut Scheduler<W>,
    error:     Option<EngineError>,
    finished:  bool,
}

impl<'s, W> EventStream<'s, W> {
    pub(crate) fn new(scheduler: &'s mut Scheduler<W>) -> Self {
        Self { scheduler, error: None, finished: false }
    }
}

impl<W> Iterator for EventStream<'_, W> {
    type Item = EngineResult<LifecycleEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.scheduler.outbox.pop_front() {
                return Some(Ok(event));
            }
            if let Some(e) = self.error.take() {
                self.finished = true;
                return Some(Err(e));
            }
            if self.finished {
                return None;
            }
            match self.scheduler.step() {
                Ok(Some(_)) => {}
                Ok(None) => self.finished = true,
                Err(e) => self.error = Some(e),
            }
        }
    }
}

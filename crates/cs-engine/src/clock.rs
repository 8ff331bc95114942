//! The virtual clock: current time plus the queue of pending wake-ups.

use cs_core::{ProcessId, SimTime};
use tracing::trace;

use crate::{EngineError, EngineResult, Event, EventKey, EventQueue};

/// Handle to a scheduled wake-up.  Carries the ordering key so callers can
/// inspect when (and in which order) it will be delivered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EventHandle(pub EventKey);

impl EventHandle {
    #[inline]
    pub fn due(&self) -> SimTime {
        self.0.time
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.0.sequence
    }
}

/// Monotonic virtual clock driving a bounded run.
///
/// `now` only ever moves forward, and only to the due time of the event
/// being delivered.  Events due strictly after `horizon` are never
/// delivered; one due exactly at the horizon still is.
#[derive(Debug)]
pub struct VirtualClock {
    now:       SimTime,
    horizon:   SimTime,
    queue:     EventQueue,
    delivered: u64,
}

impl VirtualClock {
    pub fn new(horizon: SimTime) -> Self {
        Self {
            now: SimTime::ZERO,
            horizon,
            queue: EventQueue::new(),
            delivered: 0,
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Register a wake-up for `process` at `time`.
    ///
    /// Fails with [`EngineError::InvalidSchedule`] if `time` is before the
    /// current clock reading.  Scheduling at exactly `now` is allowed.
    pub fn schedule_at(&mut self, time: SimTime, process: ProcessId) -> EngineResult<EventHandle> {
        if time < self.now {
            return Err(EngineError::InvalidSchedule {
                requested: time.minutes(),
                now:       self.now.minutes(),
            });
        }
        let key = self.queue.push(time, process);
        trace!(%process, time = %time, seq = key.sequence, "wake-up scheduled");
        Ok(EventHandle(key))
    }

    /// Register a wake-up `delay` minutes from now.
    ///
    /// Negative or non-finite delays are rejected the same way a past time
    /// is.
    pub fn schedule_in(&mut self, delay: f64, process: ProcessId) -> EngineResult<EventHandle> {
        let due = self
            .now
            .checked_add(delay)
            .ok_or(EngineError::InvalidSchedule {
                requested: self.now.minutes() + delay,
                now:       self.now.minutes(),
            })?;
        self.schedule_at(due, process)
    }

    /// Pop the earliest pending event and move the clock to its due time.
    ///
    /// Returns `None` if nothing is pending or the next event lies beyond
    /// the horizon; in the latter case the event stays queued and the clock
    /// does not move.
    pub fn advance(&mut self) -> Option<Event> {
        let next = self.queue.peek_time()?;
        if next > self.horizon {
            return None;
        }
        let event = self.queue.pop()?;
        debug_assert!(event.due() >= self.now, "clock would move backwards");
        self.now = event.due();
        self.delivered += 1;
        Some(event)
    }

    /// Number of wake-ups still queued (including any past the horizon).
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of events delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

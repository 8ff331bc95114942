//! Pending wake-ups with deterministic ordering.
//!
//! # Ordering
//!
//! Events are ordered by:
//! 1. Due time (earlier first)
//! 2. Sequence number (FIFO for the same time)
//!
//! The sequence is a per-queue insertion counter: wake-ups due at the same
//! instant are delivered in the order they were registered, and two runs that
//! schedule the same wake-ups in the same order deliver them in the same
//! order.
//!
//! `BTreeMap` gives O(log E) insert and pop where E is the number of pending
//! wake-ups.  Every live process has at most one pending wake-up, so E is
//! bounded by the fleet size plus one.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use cs_core::{ProcessId, SimTime};

/// Key for ordering events in the queue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EventKey {
    /// When this event should be delivered.
    pub time:     SimTime,
    /// Insertion counter for FIFO ordering.
    pub sequence: u64,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A wake-up popped from the queue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Event {
    pub key:     EventKey,
    pub process: ProcessId,
}

impl Event {
    #[inline]
    pub fn due(&self) -> SimTime {
        self.key.time
    }
}

/// Priority queue of pending wake-ups.
///
/// The queue does not know about the clock; time validation is the job of
/// [`VirtualClock`][crate::VirtualClock].
#[derive(Default, Debug)]
pub struct EventQueue {
    inner:    BTreeMap<EventKey, ProcessId>,
    sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a wake-up for `process` at `time` and return its key.
    pub fn push(&mut self, time: SimTime, process: ProcessId) -> EventKey {
        self.sequence += 1;
        let key = EventKey { time, sequence: self.sequence };
        self.inner.insert(key, process);
        key
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.inner
            .pop_first()
            .map(|(key, process)| Event { key, process })
    }

    /// Due time of the earliest event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|k| k.time)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

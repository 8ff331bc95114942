//! The `Scheduler`: owns every process, the world they share, and the clock.

use std::collections::VecDeque;

use cs_core::{CoreError, EntityId, LifecycleEvent, ProcessId, SimTime};
use tracing::{debug, info, warn};

use crate::{
    EngineResult, Event, EventStream, Process, ProcessContext, ProcessState,
    SimObserver, Step, VirtualClock,
};

/// Returned by [`Scheduler::spawn`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ProcessHandle {
    pub id:     ProcessId,
    pub entity: EntityId,
}

/// Counters describing where a run stopped.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RunStats {
    /// Wake-ups delivered over the whole run.
    pub delivered:      u64,
    /// Clock reading after the last delivered event.
    pub final_time:     SimTime,
    /// Processes that had not completed when the run stopped.
    pub live_processes: usize,
    /// Wake-ups still queued (all beyond the horizon).
    pub pending:        usize,
}

struct Slot<W> {
    process: Box<dyn Process<W>>,
    entity:  EntityId,
}

/// Cooperative single-threaded process scheduler.
///
/// `Scheduler<W>` drives the four-step loop described in the crate docs.
/// Processes are owned exclusively by the scheduler and dropped as soon as
/// they return [`Step::Done`]; processes still suspended when the run stops
/// are dropped with the scheduler.
///
/// Lifecycle events emitted by processes are buffered and handed out in
/// delivery order, either to a [`SimObserver`] via [`run`][Self::run] or
/// through the lazy [`events`][Self::events] iterator.
pub struct Scheduler<W> {
    clock:  VirtualClock,
    world:  W,
    slots:  Vec<Option<Slot<W>>>,
    states: Vec<ProcessState>,
    live:   usize,

    /// Events emitted by the process currently running.
    scratch: Vec<LifecycleEvent>,

    /// Emitted events not yet handed to a consumer.
    pub(crate) outbox: VecDeque<LifecycleEvent>,
}

impl<W> Scheduler<W> {
    /// Create a scheduler at time 0 that will not deliver events due after
    /// `horizon`.
    pub fn new(world: W, horizon: SimTime) -> Self {
        Self {
            clock:   VirtualClock::new(horizon),
            world,
            slots:   Vec::new(),
            states:  Vec::new(),
            live:    0,
            scratch: Vec::new(),
            outbox:  VecDeque::new(),
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register `process` and schedule its first resumption at `now`.
    ///
    /// Processes spawned at the same instant start in spawn order.  A process
    /// whose state others read at that instant (the traffic signal) should
    /// therefore be spawned first.
    pub fn spawn<P>(&mut self, process: P) -> EngineResult<ProcessHandle>
    where
        P: Process<W> + 'static,
    {
        let id = ProcessId::try_from(self.slots.len())
            .map_err(|_| CoreError::InvalidConfiguration("process table is full".into()))?;
        let entity = process.entity();

        self.clock.schedule_at(self.clock.now(), id)?;
        self.slots.push(Some(Slot {
            process: Box::new(process),
            entity,
        }));
        self.states.push(ProcessState::Created);
        self.live += 1;

        debug!(%id, %entity, "process spawned");
        Ok(ProcessHandle { id, entity })
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Deliver exactly one event: advance the clock, resume its process and
    /// apply the returned [`Step`].
    ///
    /// Returns `Ok(None)` once nothing is left to deliver before the horizon.
    pub fn step(&mut self) -> EngineResult<Option<Event>> {
        let Some(event) = self.clock.advance() else {
            return Ok(None);
        };
        let now = self.clock.now();
        let id = event.process;
        let idx = id.index();

        let Some(slot) = self.slots.get_mut(idx).and_then(Option::as_mut) else {
            // Completed processes never leave a wake-up behind, so this is
            // unreachable unless the queue was corrupted.
            warn!(%id, time = %now, "wake-up for a process that no longer exists");
            return Ok(Some(event));
        };

        self.states[idx] = ProcessState::Running;
        let step = {
            let mut ctx = ProcessContext::new(now, id, slot.entity, &mut self.world, &mut self.scratch);
            slot.process.resume(&mut ctx)
        };

        for emitted in self.scratch.drain(..) {
            debug!(time = %emitted.time, entity = %emitted.entity, kind = emitted.kind.name(), "lifecycle event");
            self.outbox.push_back(emitted);
        }

        match step {
            Step::Wait(delay) => {
                let handle = self.clock.schedule_in(delay, id)?;
                self.states[idx] = ProcessState::Suspended { until: handle.due() };
            }
            Step::Until(time) => {
                let handle = self.clock.schedule_at(time, id)?;
                self.states[idx] = ProcessState::Suspended { until: handle.due() };
            }
            Step::Done => {
                self.slots[idx] = None;
                self.states[idx] = ProcessState::Completed;
                self.live -= 1;
                debug!(%id, time = %now, "process completed");
            }
        }

        Ok(Some(event))
    }

    /// Drive the run until no event is left before the horizon.
    ///
    /// Calls observer hooks for every delivery and every lifecycle event.
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<RunStats> {
        info!(
            horizon = %self.clock.horizon(),
            processes = self.live,
            "simulation run started"
        );

        loop {
            for event in self.outbox.drain(..) {
                observer.on_event(&event);
            }
            match self.step() {
                Ok(Some(delivered)) => observer.on_delivery(&delivered),
                Ok(None) => break,
                Err(e) => {
                    // Flush what the failing process emitted before aborting.
                    for event in self.outbox.drain(..) {
                        observer.on_event(&event);
                    }
                    return Err(e);
                }
            }
        }

        let stats = self.stats();
        observer.on_sim_end(stats.final_time);
        info!(
            final_time = %stats.final_time,
            delivered = stats.delivered,
            abandoned = stats.live_processes,
            "simulation run finished"
        );
        Ok(stats)
    }

    /// Lazy, time-ordered iterator over lifecycle events.  Each `next`
    /// delivers as many events as needed to produce one lifecycle event.
    pub fn events(&mut self) -> EventStream<'_, W> {
        EventStream::new(self)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.clock.horizon()
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Consume the scheduler, dropping any unfinished processes.
    pub fn into_world(self) -> W {
        self.world
    }

    /// Processes spawned and not yet completed.
    pub fn live_processes(&self) -> usize {
        self.live
    }

    pub fn process_state(&self, id: ProcessId) -> Option<ProcessState> {
        self.states.get(id.index()).copied()
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            delivered:      self.clock.delivered(),
            final_time:     self.clock.now(),
            live_processes: self.live,
            pending:        self.clock.pending(),
        }
    }
}

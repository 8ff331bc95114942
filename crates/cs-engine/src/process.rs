//! The `Process` trait, the extension point for model code.

use cs_core::{EntityId, EventKind, LifecycleEvent, ProcessId, SimTime};

/// What a process wants after being resumed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Step {
    /// Suspend for this many minutes, then resume.  `Wait(0.0)` yields one
    /// scheduling point without moving the clock.
    Wait(f64),
    /// Suspend until the given clock reading.  Must not be in the past.
    Until(SimTime),
    /// The timeline is finished; the scheduler drops the process.
    Done,
}

/// Lifecycle of a process slot as seen from outside the scheduler.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ProcessState {
    /// Spawned; first resumption not yet delivered.
    Created,
    /// Currently inside `resume`.
    Running,
    /// Waiting for the wake-up due at `until`.
    Suspended { until: SimTime },
    /// Returned `Step::Done` and has been dropped.
    Completed,
}

/// A suspendable timeline for one simulated entity.
///
/// A process is written as an explicit state machine: `resume` runs from
/// the point where the previous call left off up to the next suspension
/// point, records where to continue in `self`, and returns the requested
/// [`Step`].  It never blocks and is never preempted.
///
/// `W` is the world shared by every process of a run.  The scheduler hands
/// out `&mut W` to exactly one process at a time.
///
/// # Example
///
/// ```rust,ignore
/// struct Blinker { on: bool }
///
/// impl Process<Lamp> for Blinker {
///     fn entity(&self) -> EntityId { EntityId::Signal }
///
///     fn resume(&mut self, ctx: &mut ProcessContext<'_, Lamp>) -> Step {
///         self.on = !self.on;
///         ctx.world_mut().lit = self.on;
///         Step::Wait(1.0)
///     }
/// }
/// ```
pub trait Process<W> {
    /// The entity this timeline represents, used to tag emitted events.
    fn entity(&self) -> EntityId;

    /// Run until the next suspension point.
    fn resume(&mut self, ctx: &mut ProcessContext<'_, W>) -> Step;
}

/// Everything a process may touch while it is running.
pub struct ProcessContext<'a, W> {
    now:     SimTime,
    process: ProcessId,
    entity:  EntityId,
    world:   &'a mut W,
    emitted: &'a mut Vec<LifecycleEvent>,
}

impl<'a, W> ProcessContext<'a, W> {
    /// Build a context for a single resumption.
    #[inline]
    pub fn new(
        now:     SimTime,
        process: ProcessId,
        entity:  EntityId,
        world:   &'a mut W,
        emitted: &'a mut Vec<LifecycleEvent>,
    ) -> Self {
        Self { now, process, entity, world, emitted }
    }

    /// Current clock reading.  Constant for the whole resumption.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn process(&self) -> ProcessId {
        self.process
    }

    #[inline]
    pub fn world(&self) -> &W {
        self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut W {
        self.world
    }

    /// Record a lifecycle event for this process's entity at `now`.
    pub fn emit(&mut self, kind: EventKind) {
        self.emitted.push(LifecycleEvent {
            time:   self.now,
            entity: self.entity,
            kind,
        });
    }
}

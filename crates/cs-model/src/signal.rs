//! The traffic signal guarding the single-lane crossing.

use cs_core::{EntityId, EventKind, SimConfig, SimTime};
use cs_engine::{Process, ProcessContext, Step};

use crate::Crossing;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SignalPhase {
    Green,
    Red,
}

/// Observable signal state.
///
/// `next_green` is only meaningful while the phase is red; it is set at the
/// green→red transition, before the signal process suspends.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficSignal {
    phase:      SignalPhase,
    next_green: SimTime,
    cycles:     u64,
}

impl Default for TrafficSignal {
    fn default() -> Self {
        Self {
            phase:      SignalPhase::Green,
            next_green: SimTime::ZERO,
            cycles:     0,
        }
    }
}

impl TrafficSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> SignalPhase {
        self.phase
    }

    /// When the current red phase ends, or `None` while green.
    pub fn next_green(&self) -> Option<SimTime> {
        (self.phase == SignalPhase::Red).then_some(self.next_green)
    }

    /// Minutes a vehicle arriving at `now` must wait, or `None` if it may
    /// pass.  A red phase ending exactly at `now` counts as green.
    pub fn wait_for_green(&self, now: SimTime) -> Option<f64> {
        self.next_green().filter(|&green| green > now).map(|green| green - now)
    }

    /// Completed green→red→green cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub(crate) fn turn_red(&mut self, next_green: SimTime) {
        self.phase = SignalPhase::Red;
        self.next_green = next_green;
    }

    pub(crate) fn turn_green(&mut self) {
        if self.phase == SignalPhase::Red {
            self.cycles += 1;
        }
        self.phase = SignalPhase::Green;
    }
}

// ── SignalProcess ─────────────────────────────────────────────────────────────

/// Which phase the process is sitting in while suspended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum SignalStage {
    Start,
    Green,
    Red,
}

/// Cycles the shared [`TrafficSignal`] green → red → green … forever.
///
/// Never returns [`Step::Done`]; it is abandoned at the horizon.  Spawn it
/// before any truck so it wins the t=0 tie.
pub struct SignalProcess {
    green: f64,
    red:   f64,
    stage: SignalStage,
}

impl SignalProcess {
    pub fn new(green: f64, red: f64) -> Self {
        Self { green, red, stage: SignalStage::Start }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.green_light_duration, config.red_light_duration)
    }
}

impl Process<Crossing> for SignalProcess {
    fn entity(&self) -> EntityId {
        EntityId::Signal
    }

    fn resume(&mut self, ctx: &mut ProcessContext<'_, Crossing>) -> Step {
        match self.stage {
            SignalStage::Start | SignalStage::Red => {
                ctx.world_mut().signal.turn_green();
                ctx.emit(EventKind::SignalGreen);
                self.stage = SignalStage::Green;
                Step::Wait(self.green)
            }
            SignalStage::Green => {
                let now = ctx.now();
                let next_green = now.checked_add(self.red).unwrap_or(now);
                ctx.world_mut().signal.turn_red(next_green);
                ctx.emit(EventKind::SignalRed { next_green });
                self.stage = SignalStage::Red;
                Step::Wait(self.red)
            }
        }
    }
}

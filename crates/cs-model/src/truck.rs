//! The truck round-trip process.
//!
//! # Workflow (one round trip)
//!
//! ```text
//! Start/next trip ─ draw load time, wait it ─────────────▶ Loaded
//! Loaded          ─ drive origin → crossing ─────────────▶ AtCrossing(Outbound)
//! AtCrossing(leg) ─ green: drive on ─────────────────────▶ Arrived(leg)
//!                 ─ red:   wait until next green, re-check ▶ AtCrossing(leg)
//! Arrived(Out)    ─ unload (same draw as loading) ───────▶ Unloaded
//! Unloaded        ─ drive destination → crossing ────────▶ AtCrossing(Inbound)
//! Arrived(In)     ─ trip done; last trip → record result, Done
//! ```
//!
//! The red-light branch always re-checks after waiting instead of assuming
//! one wait suffices.

use cs_core::{EntityId, EntityRng, EventKind, Leg, LoadTimeSampling, SimConfig, SimTime, TruckId};
use cs_engine::{Process, ProcessContext, Step};
use tracing::trace;

use crate::{Crossing, TruckResult};

/// The parts of [`SimConfig`] a truck needs, copied once per truck.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TripPlan {
    pub round_trips:           u32,
    pub drive_origin_signal:   f64,
    pub drive_signal_dest:     f64,
    pub load_range:            [f64; 2],
    pub sampling:              LoadTimeSampling,
}

impl TripPlan {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            round_trips:         config.round_trips,
            drive_origin_signal: config.drive_time_origin_to_signal,
            drive_signal_dest:   config.drive_time_signal_to_destination,
            load_range:          config.load_unload_range,
            sampling:            config.load_time_sampling,
        }
    }

    /// Drive time from the crossing to the end of `leg`.
    fn beyond_crossing(&self, leg: Leg) -> f64 {
        match leg {
            Leg::Outbound => self.drive_signal_dest,
            Leg::Inbound => self.drive_origin_signal,
        }
    }
}

/// Draw one load/unload duration from `range` (inclusive).
pub fn draw_load_time(rng: &mut EntityRng, range: [f64; 2], sampling: LoadTimeSampling) -> f64 {
    let [min, max] = range;
    if min >= max {
        return min;
    }
    if sampling == LoadTimeSampling::WholeMinutes {
        let lo = min.ceil();
        let hi = max.floor();
        if lo <= hi {
            return rng.gen_range(lo as i64..=hi as i64) as f64;
        }
    }
    rng.gen_range(min..=max)
}

/// Running tally for one truck.  Written only by its own process.
#[derive(Clone, Debug, PartialEq)]
pub struct Truck {
    pub id:                    TruckId,
    pub start_time:            SimTime,
    pub round_trips_completed: u32,
    pub stops_at_red:          u32,
    pub total_red_wait:        f64,
}

impl Truck {
    pub fn new(id: TruckId) -> Self {
        Self {
            id,
            start_time:            SimTime::ZERO,
            round_trips_completed: 0,
            stops_at_red:          0,
            total_red_wait:        0.0,
        }
    }
}

/// Where the truck resumes after its current wait.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum TruckStage {
    Start,
    Loaded,
    AtCrossing(Leg),
    Arrived(Leg),
    Unloaded,
}

pub struct TruckProcess {
    truck:     Truck,
    plan:      TripPlan,
    rng:       EntityRng,
    stage:     TruckStage,
    /// Drawn at the start of each trip; reused for unloading.
    load_time: f64,
}

impl TruckProcess {
    pub fn new(id: TruckId, plan: TripPlan, run_seed: u64) -> Self {
        Self {
            truck: Truck::new(id),
            plan,
            rng: EntityRng::new(run_seed, id),
            stage: TruckStage::Start,
            load_time: 0.0,
        }
    }

    pub fn truck(&self) -> &Truck {
        &self.truck
    }

    fn begin_trip(&mut self, ctx: &mut ProcessContext<'_, Crossing>) -> Step {
        self.load_time = draw_load_time(&mut self.rng, self.plan.load_range, self.plan.sampling);
        ctx.emit(EventKind::Loading { duration: self.load_time });
        self.stage = TruckStage::Loaded;
        Step::Wait(self.load_time)
    }

    fn at_crossing(&mut self, ctx: &mut ProcessContext<'_, Crossing>, leg: Leg) -> Step {
        let now = ctx.now();
        let signal = &ctx.world().signal;
        let (wait, green) = (signal.wait_for_green(now), signal.next_green());
        let Some(wait) = wait else {
            ctx.emit(EventKind::PassedGreen { leg });
            self.stage = TruckStage::Arrived(leg);
            return Step::Wait(self.plan.beyond_crossing(leg));
        };

        self.truck.stops_at_red += 1;
        self.truck.total_red_wait += wait;
        ctx.emit(EventKind::WaitingAtRed { leg, wait });
        trace!(truck = %self.truck.id, ?leg, wait, "stopped at red");
        // Wake at the signal's own timestamp so the re-check sees it green.
        Step::Until(green.unwrap_or(now))
    }

    fn finish_trip(&mut self, ctx: &mut ProcessContext<'_, Crossing>) -> Step {
        self.truck.round_trips_completed += 1;
        ctx.emit(EventKind::ArrivedOrigin { trip: self.truck.round_trips_completed });

        if self.truck.round_trips_completed < self.plan.round_trips {
            return self.begin_trip(ctx);
        }

        let total_time = ctx.now().since(self.truck.start_time);
        let result = TruckResult {
            total_time,
            stops_at_red:   self.truck.stops_at_red,
            total_red_wait: self.truck.total_red_wait,
        };
        ctx.world_mut().results.record(self.truck.id, result);
        ctx.emit(EventKind::Finished { total_time });
        Step::Done
    }
}

impl Process<Crossing> for TruckProcess {
    fn entity(&self) -> EntityId {
        EntityId::Truck(self.truck.id)
    }

    fn resume(&mut self, ctx: &mut ProcessContext<'_, Crossing>) -> Step {
        match self.stage {
            TruckStage::Start => {
                self.truck.start_time = ctx.now();
                ctx.emit(EventKind::Started);
                self.begin_trip(ctx)
            }
            TruckStage::Loaded => {
                ctx.emit(EventKind::DepartedOrigin);
                self.stage = TruckStage::AtCrossing(Leg::Outbound);
                Step::Wait(self.plan.drive_origin_signal)
            }
            TruckStage::AtCrossing(leg) => self.at_crossing(ctx, leg),
            TruckStage::Arrived(Leg::Outbound) => {
                ctx.emit(EventKind::ArrivedDestination);
                ctx.emit(EventKind::Unloading { duration: self.load_time });
                self.stage = TruckStage::Unloaded;
                Step::Wait(self.load_time)
            }
            TruckStage::Unloaded => {
                ctx.emit(EventKind::DepartedDestination);
                self.stage = TruckStage::AtCrossing(Leg::Inbound);
                Step::Wait(self.plan.drive_signal_dest)
            }
            TruckStage::Arrived(Leg::Inbound) => self.finish_trip(ctx),
        }
    }
}

//! Fluent builder for constructing a [`CrossingSim`].

use cs_core::{SimConfig, SimTime, TruckId, resolve_seed};
use cs_engine::{
    EngineResult, EventStream, NoopObserver, RunStats, Scheduler, SimObserver,
};
use tracing::info;

use crate::{Crossing, ResultsMap, SignalProcess, TripPlan, TruckProcess};

/// Builder for [`CrossingSim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: signal timing, fleet size, drive/load times, horizon
///
/// # Optional inputs (have defaults)
///
/// | Method      | Default                                             |
/// |-------------|-----------------------------------------------------|
/// | `.seed(s)`  | `config.random_seed`, else drawn from OS entropy    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).seed(42).build()?;
/// sim.run(&mut NoopObserver)?;
/// let report = sim.into_report();
/// println!("all delivered: {}", report.all_delivered());
/// ```
pub struct SimBuilder {
    config: SimConfig,
    seed:   Option<u64>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, seed: None }
    }

    /// Override the run seed from the configuration.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration, then spawn the signal and every truck.
    ///
    /// Nothing is scheduled if validation fails.
    pub fn build(self) -> EngineResult<CrossingSim> {
        self.config.validate()?;

        let seed = resolve_seed(self.seed.or(self.config.random_seed));
        let mut scheduler = Scheduler::new(Crossing::new(), self.config.horizon());

        // The signal goes first so that it also wins the t=0 tie.
        scheduler.spawn(SignalProcess::from_config(&self.config))?;

        let plan = TripPlan::from_config(&self.config);
        for i in 0..self.config.truck_count {
            scheduler.spawn(TruckProcess::new(TruckId(i), plan, seed))?;
        }

        info!(
            trucks = self.config.truck_count,
            round_trips = self.config.round_trips,
            horizon = self.config.simulation_horizon,
            seed,
            "crossing simulation built"
        );

        Ok(CrossingSim {
            config: self.config,
            seed,
            scheduler,
        })
    }
}

/// A fully set-up run: one signal process plus one process per truck.
///
/// Create via [`SimBuilder`].
pub struct CrossingSim {
    config:    SimConfig,
    seed:      u64,
    scheduler: Scheduler<Crossing>,
}

impl CrossingSim {
    /// Run to the horizon, reporting to `observer`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<RunStats> {
        self.scheduler.run(observer)
    }

    /// Lazy alternative to [`run`][Self::run].
    pub fn events(&mut self) -> EventStream<'_, Crossing> {
        self.scheduler.events()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The seed actually used (resolved if the configuration had none).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn world(&self) -> &Crossing {
        self.scheduler.world()
    }

    pub fn scheduler(&self) -> &Scheduler<Crossing> {
        &self.scheduler
    }

    /// Snapshot the results as they stand now.
    pub fn report(&self) -> RunReport {
        self.make_report(self.world().results.clone())
    }

    /// Consume the run, abandoning unfinished processes.
    pub fn into_report(self) -> RunReport {
        let mut report = self.make_report(ResultsMap::new());
        report.results = self.scheduler.into_world().results;
        report
    }

    fn make_report(&self, results: ResultsMap) -> RunReport {
        let stats = self.scheduler.stats();
        RunReport {
            truck_count:   self.config.truck_count,
            round_trips:   self.config.round_trips,
            final_time:    stats.final_time,
            delivered:     stats.delivered,
            seed:          self.seed,
            signal_cycles: self.world().signal.cycles(),
            results,
        }
    }
}

/// Read-only outcome of a run, handed to reporting layers.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub results:       ResultsMap,
    pub truck_count:   u32,
    pub round_trips:   u32,
    /// Clock reading after the last delivered event.
    pub final_time:    SimTime,
    /// Wake-ups delivered over the run.
    pub delivered:     u64,
    pub seed:          u64,
    /// Completed green→red→green signal cycles.
    pub signal_cycles: u64,
}

impl RunReport {
    /// `true` iff every spawned truck finished before the horizon.
    pub fn all_delivered(&self) -> bool {
        self.results.all_delivered(self.truck_count as usize)
    }

    /// Trucks still on the road when the run stopped.
    pub fn abandoned(&self) -> usize {
        (self.truck_count as usize).saturating_sub(self.results.len())
    }
}

/// Build and run `config` with no observer.
pub fn simulate(config: SimConfig) -> EngineResult<RunReport> {
    let mut sim = SimBuilder::new(config).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.into_report())
}

//! Run configuration.
//!
//! Every model parameter lives in [`SimConfig`] and is passed explicitly to
//! the simulation builder; nothing is read from process-wide state.  The
//! application crate typically loads it from a JSON file (feature `serde`)
//! and overrides individual fields from the command line.

use crate::{CoreError, CoreResult, SimTime};

/// How the per-trip load/unload duration is drawn from
/// [`SimConfig::load_unload_range`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadTimeSampling {
    /// Uniform over the whole minutes inside the range (both ends inclusive).
    /// Falls back to `Continuous` if the range contains no whole minute.
    #[default]
    WholeMinutes,
    /// Uniform over the real interval `[min, max]`.
    Continuous,
}

/// Top-level simulation configuration.  All durations are in minutes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// How long the signal stays red.
    pub red_light_duration: f64,

    /// How long the signal stays green.
    pub green_light_duration: f64,

    /// Number of trucks spawned at time 0.
    pub truck_count: u32,

    /// Events due after this time are never delivered.
    pub simulation_horizon: f64,

    /// `[min, max]` bounds of the load (and unload) duration.
    pub load_unload_range: [f64; 2],

    /// Drive time between the origin site and the crossing, either direction.
    pub drive_time_origin_to_signal: f64,

    /// Drive time between the crossing and the destination site, either
    /// direction.
    pub drive_time_signal_to_destination: f64,

    /// Round trips each truck must finish before its result is recorded.
    pub round_trips: u32,

    /// Run seed.  `None` draws one from OS entropy; the resolved seed is
    /// reported with the results.
    pub random_seed: Option<u64>,

    pub load_time_sampling: LoadTimeSampling,
}

impl Default for SimConfig {
    /// One 8-hour shift with a 1,000-truck fleet and a 5/3 minute red/green
    /// cycle.
    fn default() -> Self {
        Self {
            red_light_duration:               5.0,
            green_light_duration:             3.0,
            truck_count:                      1_000,
            simulation_horizon:               480.0,
            load_unload_range:                [30.0, 41.0],
            drive_time_origin_to_signal:      26.0,
            drive_time_signal_to_destination: 10.0,
            round_trips:                      3,
            random_seed:                      None,
            load_time_sampling:               LoadTimeSampling::WholeMinutes,
        }
    }
}

impl SimConfig {
    /// Reject non-positive durations, an empty fleet, zero round trips and a
    /// malformed load range.  Called by the builder before anything is
    /// scheduled.
    pub fn validate(&self) -> CoreResult<()> {
        positive("red_light_duration", self.red_light_duration)?;
        positive("green_light_duration", self.green_light_duration)?;
        positive("simulation_horizon", self.simulation_horizon)?;
        positive("drive_time_origin_to_signal", self.drive_time_origin_to_signal)?;
        positive("drive_time_signal_to_destination", self.drive_time_signal_to_destination)?;

        let [min, max] = self.load_unload_range;
        positive("load_unload_range[0]", min)?;
        positive("load_unload_range[1]", max)?;
        if min > max {
            return Err(CoreError::InvalidConfiguration(format!(
                "load_unload_range min {min} is greater than max {max}"
            )));
        }

        if self.truck_count == 0 {
            return Err(CoreError::InvalidConfiguration("truck_count must be > 0".into()));
        }
        if self.round_trips == 0 {
            return Err(CoreError::InvalidConfiguration("round_trips must be > 0".into()));
        }
        Ok(())
    }

    /// The run horizon as a clock value.
    ///
    /// Only meaningful after [`validate`][Self::validate] succeeded.
    pub fn horizon(&self) -> SimTime {
        SimTime::new(self.simulation_horizon).unwrap_or(SimTime::ZERO)
    }

    /// Time for one round trip with no red-light delay and the shortest
    /// possible load draw.
    pub fn min_round_trip_time(&self) -> f64 {
        2.0 * self.drive_time_origin_to_signal
            + 2.0 * self.drive_time_signal_to_destination
            + 2.0 * self.load_unload_range[0]
    }

    /// Lower bound on any truck's total time: `round_trips` undelayed trips.
    pub fn min_completion_time(&self) -> f64 {
        self.round_trips as f64 * self.min_round_trip_time()
    }

    /// Length of one green + red signal cycle.
    pub fn signal_period(&self) -> f64 {
        self.green_light_duration + self.red_light_duration
    }
}

fn positive(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidConfiguration(format!(
            "{name} must be a finite number > 0, got {value}"
        )))
    }
}

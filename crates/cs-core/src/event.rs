//! Lifecycle events emitted by processes.
//!
//! The scheduler forwards every event, in delivery order, to whoever is
//! observing the run.  Reporting layers consume this stream; the model never
//! calls into a printer directly.

use std::fmt;

use crate::{EntityId, SimTime};

/// Direction of travel through the crossing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leg {
    /// Origin → destination (loaded).
    Outbound,
    /// Destination → origin (empty).
    Inbound,
}

/// What happened.  Durations are in minutes.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    // ── Truck ─────────────────────────────────────────────────────────────
    Started,
    Loading { duration: f64 },
    DepartedOrigin,
    PassedGreen { leg: Leg },
    WaitingAtRed { leg: Leg, wait: f64 },
    ArrivedDestination,
    Unloading { duration: f64 },
    DepartedDestination,
    ArrivedOrigin { trip: u32 },
    Finished { total_time: f64 },

    // ── Signal ────────────────────────────────────────────────────────────
    SignalGreen,
    SignalRed { next_green: SimTime },
}

impl EventKind {
    /// Stable snake_case name, used as the `kind` column of exported logs.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Started                => "started",
            EventKind::Loading { .. }         => "loading",
            EventKind::DepartedOrigin         => "departed_origin",
            EventKind::PassedGreen { .. }     => "passed_green",
            EventKind::WaitingAtRed { .. }    => "waiting_at_red",
            EventKind::ArrivedDestination     => "arrived_destination",
            EventKind::Unloading { .. }       => "unloading",
            EventKind::DepartedDestination    => "departed_destination",
            EventKind::ArrivedOrigin { .. }   => "arrived_origin",
            EventKind::Finished { .. }        => "finished",
            EventKind::SignalGreen            => "signal_green",
            EventKind::SignalRed { .. }       => "signal_red",
        }
    }

    /// The numeric payload of the event, if it carries one.
    pub fn value(&self) -> Option<f64> {
        match *self {
            EventKind::Loading { duration } | EventKind::Unloading { duration } => Some(duration),
            EventKind::WaitingAtRed { wait, .. } => Some(wait),
            EventKind::ArrivedOrigin { trip } => Some(trip as f64),
            EventKind::Finished { total_time } => Some(total_time),
            EventKind::SignalRed { next_green } => Some(next_green.minutes()),
            _ => None,
        }
    }
}

/// One entry of the run's event log.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifecycleEvent {
    pub time:   SimTime,
    pub entity: EntityId,
    pub kind:   EventKind,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.time, self.entity, self.kind.name())?;
        if let Some(v) = self.kind.value() {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

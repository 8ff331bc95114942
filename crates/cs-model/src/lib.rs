//! `cs-model` — the two-site haulage model built on `cs-engine`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`signal`]  | `TrafficSignal`, `SignalPhase`, `SignalProcess`               |
//! | [`truck`]   | `Truck`, `TripPlan`, `TruckProcess`, `draw_load_time`         |
//! | [`results`] | `TruckResult`, `ResultsMap`, `ResultsSummary`                 |
//! | [`world`]   | `Crossing` — state shared by every process of a run           |
//! | [`builder`] | `SimBuilder`, `CrossingSim`, `RunReport`, `simulate`          |
//!
//! # Model
//!
//! ```text
//!   origin ──drive──▶ [signal] ──drive──▶ destination
//!     ▲  load                                 unload │
//!     └──drive── [signal] ◀──drive────────────────────┘
//! ```
//!
//! One signal process cycles green/red forever.  Every truck runs its own
//! process: load, drive to the crossing, wait while red, drive on, unload,
//! and come back the same way, for a configured number of round trips.  A
//! truck's result is recorded once, when its last trip ends; trucks still on
//! the road at the horizon leave no result.

pub mod builder;
pub mod results;
pub mod signal;
pub mod truck;
pub mod world;


pub use builder::{CrossingSim, RunReport, SimBuilder, simulate};
pub use results::{ResultsMap, ResultsSummary, TruckResult};
pub use signal::{SignalPhase, SignalProcess, TrafficSignal};
pub use truck::{TripPlan, Truck, TruckProcess, draw_load_time};
pub use world::Crossing;

//! `cs-core` — foundational types for the `crossing_sim` truck logistics model.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `TruckId`, `ProcessId`, `EntityId`                    |
//! | [`time`]        | `SimTime` (virtual minutes, totally ordered)          |
//! | [`rng`]         | `EntityRng` (per-truck), `resolve_seed`               |
//! | [`config`]      | `SimConfig`, `LoadTimeSampling`                       |
//! | [`event`]       | `LifecycleEvent`, `EventKind`, `Leg`                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config, ids and events.  |
//!
//! The `serde` feature is required to load a `SimConfig` from JSON.

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{LoadTimeSampling, SimConfig};
pub use error::{CoreError, CoreResult};
pub use event::{EventKind, Leg, LifecycleEvent};
pub use ids::{EntityId, ProcessId, TruckId};
pub use rng::{EntityRng, resolve_seed};
pub use time::SimTime;

//! `sf-core` — foundational types for the stroke pathway simulation.
//!
//! This crate is a dependency of every other `sf-*` crate.  It has no `sf-*`
//! dependencies and minimal external ones (`rand`, `rand_distr` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PatientId`                                           |
//! | [`time`]        | `SimTime`, `SimClock`, `RunWindow`                    |
//! | [`rng`]         | `SimRng` (the single seeded stream of a run)          |
//! | [`variate`]     | `LogNormalParams`, `Exponential`                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and time types.      |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod variate;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::PatientId;
pub use rng::SimRng;
pub use time::{RunWindow, SimClock, SimTime};
pub use variate::{Exponential, LogNormalParams};

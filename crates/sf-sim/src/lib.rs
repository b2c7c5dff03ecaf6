//! `sf-sim` — discrete-event engine for the stroke pathway model.
//!
//! # Processes
//!
//! ```text
//! Arrival   loop: admit → route → sample LOS → register → enter HASU
//!                 → wait Exp(1 / inter_arrival_time)
//! Pathway   HASU → [ASU] → [ESD] → leave population
//! Audit     wait warm_up, then loop: snapshot occupancy → wait 1 day
//! ```
//!
//! All processes share one clock and run cooperatively on a single thread.
//! Processes due at the same instant resume in the order they were
//! scheduled, so a seed reproduces a run exactly.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//! | `fx-hash`  | FxHash for the active-population map.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sf_sim::{Model, ModelParams};
//!
//! let mut model = Model::new(ModelParams::default())?;
//! model.run(100.0, 365.0)?;
//! for (name, value) in model.summary().unwrap().entries() {
//!     println!("{name}: {value}");
//! }
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod params;
pub mod process;
pub mod replicate;
pub mod routing;

#[cfg(test)]
mod tests;

pub use builder::{DEFAULT_SEED, ModelBuilder};
pub use error::{SimError, SimResult};
pub use model::Model;
pub use observer::{NoopObserver, SimObserver};
pub use params::{ModelParams, ResolvedParams, load_params_json, load_params_reader};
pub use replicate::{pooled_summary, replication_seeds, run_replications};
pub use routing::Route;

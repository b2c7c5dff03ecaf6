//! `sf-pathway` — the care pathway: who is where, and what the audit saw.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`patient`]    | `Stage`, `Patient`, `PathwayKind`                         |
//! | [`population`] | `Population` — active patients keyed by `PatientId`       |
//! | [`system`]     | `CarePathway` — occupancy counters, admissions, audits    |
//! | [`report`]     | `AuditRow`, `AuditReport`, `AuditSummary`, `Percentiles`  |
//! | [`chart`]      | `ChartOptions`, `OccupancyChart`, `ChartRenderer`         |
//! | [`error`]      | `PathwayError`, `PathwayResult<T>`                        |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the population map.        |
//! | `serde`   | `Serialize`/`Deserialize` on patients and report types.  |

pub mod chart;
pub mod error;
pub mod patient;
pub mod population;
pub mod report;
pub mod system;


pub use chart::{ChartOptions, ChartRenderer, NoopRenderer, OccupancyChart, StageStyle};
pub use error::{PathwayError, PathwayResult};
pub use patient::{PathwayKind, Patient, Stage};
pub use population::{Population, Resident};
pub use report::{AuditReport, AuditRow, AuditSummary, Percentiles};
pub use system::{CarePathway, Occupancy};

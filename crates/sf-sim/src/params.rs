//! Model parameters and their JSON loaders.
//!
//! # JSON format
//!
//! A flat object; every key is optional and unknown keys are ignored:
//!
//! ```json
//! {
//!   "admissions_per_year": 1000,
//!   "prop_hasu_using_asu": 0.7,
//!   "prop_hasu_using_esd_only": 0.1,
//!   "prop_asu_using_esd": 0.5,
//!   "los_hasu_mean": 2.0,        "los_hasu_cv": 1.0,
//!   "los_asu_no_esd_mean": 15,   "los_asu_no_esd_cv": 1.0,
//!   "los_asu_with_esd_mean": 15, "los_asu_with_esd_cv": 1.0,
//!   "los_esd_mean": 20,          "los_esd_cv": 1.0
//! }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sf_core::error::{ensure_positive, ensure_probability};
use sf_core::{CoreResult, Exponential, LogNormalParams};

use crate::SimResult;

/// Days per year used to turn an annual admission rate into a mean gap.
pub const DAYS_PER_YEAR: f64 = 365.0;

// ── ModelParams ───────────────────────────────────────────────────────────────

/// Every recognised model option.  Missing keys take the [`Default`] value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub admissions_per_year:      f64,
    pub prop_hasu_using_asu:      f64,
    pub prop_hasu_using_esd_only: f64,
    pub prop_asu_using_esd:       f64,
    pub los_hasu_mean:            f64,
    pub los_hasu_cv:              f64,
    pub los_asu_no_esd_mean:      f64,
    pub los_asu_no_esd_cv:        f64,
    pub los_asu_with_esd_mean:    f64,
    pub los_asu_with_esd_cv:      f64,
    pub los_esd_mean:             f64,
    pub los_esd_cv:               f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            admissions_per_year:      1000.0,
            prop_hasu_using_asu:      0.7,
            prop_hasu_using_esd_only: 0.1,
            prop_asu_using_esd:       0.5,
            los_hasu_mean:            2.0,
            los_hasu_cv:              1.0,
            los_asu_no_esd_mean:      15.0,
            los_asu_no_esd_cv:        1.0,
            los_asu_with_esd_mean:    15.0,
            los_asu_with_esd_cv:      1.0,
            los_esd_mean:             20.0,
            los_esd_cv:               1.0,
        }
    }
}

impl ModelParams {
    /// Parse from a JSON object string.
    pub fn from_json_str(s: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Mean days between admissions.
    pub fn inter_arrival_time(&self) -> f64 {
        DAYS_PER_YEAR / self.admissions_per_year
    }

    /// Check every constraint; the first violation is reported by name.
    pub fn validate(&self) -> CoreResult<()> {
        self.resolve().map(|_| ())
    }

    /// Validate and convert into sampling-ready distributions.
    pub fn resolve(&self) -> CoreResult<ResolvedParams> {
        ensure_positive("admissions_per_year", self.admissions_per_year)?;
        let routing = Routing {
            hasu_using_asu:      ensure_probability("prop_hasu_using_asu", self.prop_hasu_using_asu)?,
            hasu_using_esd_only: ensure_probability(
                "prop_hasu_using_esd_only",
                self.prop_hasu_using_esd_only,
            )?,
            asu_using_esd:       ensure_probability("prop_asu_using_esd", self.prop_asu_using_esd)?,
        };
        let stays = StayDistributions {
            hasu:         LogNormalParams::for_field("los_hasu", self.los_hasu_mean, self.los_hasu_cv)?,
            asu_no_esd:   LogNormalParams::for_field(
                "los_asu_no_esd",
                self.los_asu_no_esd_mean,
                self.los_asu_no_esd_cv,
            )?,
            asu_with_esd: LogNormalParams::for_field(
                "los_asu_with_esd",
                self.los_asu_with_esd_mean,
                self.los_asu_with_esd_cv,
            )?,
            esd:          LogNormalParams::for_field("los_esd", self.los_esd_mean, self.los_esd_cv)?,
        };
        let inter_arrival = Exponential::from_mean(self.inter_arrival_time())
            .map_err(|_| sf_core::CoreError::invalid(
                "admissions_per_year",
                "small enough for a positive inter-arrival time",
                self.admissions_per_year,
            ))?;
        Ok(ResolvedParams { routing, stays, inter_arrival })
    }
}

// ── Resolved parameters ───────────────────────────────────────────────────────

/// Routing probabilities, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Routing {
    pub hasu_using_asu:      f64,
    pub hasu_using_esd_only: f64,
    pub asu_using_esd:       f64,
}

/// Log-normal length-of-stay distributions.  ESD after ASU and ESD straight
/// after HASU share one distribution.
#[derive(Clone, Copy, Debug)]
pub struct StayDistributions {
    pub hasu:         LogNormalParams,
    pub asu_no_esd:   LogNormalParams,
    pub asu_with_esd: LogNormalParams,
    pub esd:          LogNormalParams,
}

/// Parameters after validation, ready for sampling.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedParams {
    pub routing:       Routing,
    pub stays:         StayDistributions,
    pub inter_arrival: Exponential,
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load [`ModelParams`] from a JSON file.
pub fn load_params_json(path: &Path) -> SimResult<ModelParams> {
    let file = std::fs::File::open(path)?;
    load_params_reader(std::io::BufReader::new(file))
}

/// Like [`load_params_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from stdin.
pub fn load_params_reader<R: Read>(reader: R) -> SimResult<ModelParams> {
    Ok(serde_json::from_reader(reader)?)
}

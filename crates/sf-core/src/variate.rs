//! Random-variate parameterisation.
//!
//! Lengths of stay are configured as an arithmetic mean and a coefficient of
//! variation (cv = sd / mean) and drawn from a log-normal distribution whose
//! shape parameters reproduce that mean and cv:
//!
//! ```text
//! sd    = mean * cv
//! sigma = sqrt(ln(1 + (sd / mean)^2))
//! mu    = ln(mean) - sigma^2 / 2
//! ```
//!
//! Inter-arrival gaps are exponential with rate `1 / mean`.

use rand_distr::{Exp, LogNormal};

use crate::error::{ensure_non_negative, ensure_positive, CoreError, CoreResult};
use crate::SimRng;

// ── LogNormalParams ───────────────────────────────────────────────────────────

/// Log-normal shape parameters derived from an arithmetic mean and cv.
#[derive(Clone, Copy, Debug)]
pub struct LogNormalParams {
    /// Arithmetic mean the parameters were derived from.
    pub mean:  f64,
    /// Coefficient of variation the parameters were derived from.
    pub cv:    f64,
    /// Log-location.
    pub mu:    f64,
    /// Log-scale.  Zero for a point mass at `mean`.
    pub sigma: f64,
    dist:      LogNormal<f64>,
}

impl LogNormalParams {
    /// Convert `(mean, cv)` into log-normal `(mu, sigma)`.
    ///
    /// `mean` must be finite and > 0, `cv` finite and ≥ 0.
    pub fn from_mean_cv(mean: f64, cv: f64) -> CoreResult<Self> {
        let mean = ensure_positive("mean", mean)?;
        let cv = ensure_non_negative("cv", cv)?;

        let sd = mean * cv;
        let sigma = (1.0 + (sd / mean).powi(2)).ln().sqrt();
        let mu = mean.ln() - sigma.powi(2) / 2.0;
        let dist = LogNormal::new(mu, sigma)
            .map_err(|_| CoreError::invalid("cv", "small enough for a finite log-scale", cv))?;

        Ok(Self { mean, cv, mu, sigma, dist })
    }

    /// Same as [`from_mean_cv`][Self::from_mean_cv] but reports violations
    /// against `<prefix>_mean` / `<prefix>_cv`.
    pub fn for_field(prefix: &str, mean: f64, cv: f64) -> CoreResult<Self> {
        ensure_positive(&format!("{prefix}_mean"), mean)?;
        ensure_non_negative(&format!("{prefix}_cv"), cv)?;
        Self::from_mean_cv(mean, cv)
    }

    /// `true` when the distribution is a point mass at `mean`.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.sigma == 0.0
    }

    /// Draw one value.  A point mass returns `mean` exactly without touching
    /// the stream.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        if self.is_degenerate() {
            return self.mean;
        }
        rng.sample(&self.dist)
    }
}

impl PartialEq for LogNormalParams {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean && self.cv == other.cv
    }
}

// ── Exponential ───────────────────────────────────────────────────────────────

/// Exponential gaps with a given mean.
#[derive(Clone, Copy, Debug)]
pub struct Exponential {
    pub mean: f64,
    dist:     Exp<f64>,
}

impl Exponential {
    /// `mean` must be finite and > 0.
    pub fn from_mean(mean: f64) -> CoreResult<Self> {
        let mean = ensure_positive("mean", mean)?;
        let dist = Exp::new(1.0 / mean)
            .map_err(|_| CoreError::invalid("mean", "finite and > 0", mean))?;
        Ok(Self { mean, dist })
    }

    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        rng.sample(&self.dist)
    }
}

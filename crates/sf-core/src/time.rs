//! Simulated time model.
//!
//! # Design
//!
//! Time is continuous and measured in days.  `SimTime` wraps an `f64` and
//! gives it a total order (via [`f64::total_cmp`]) so it can key ordered
//! collections such as the event queue.  Times produced by the engine are
//! always finite and non-negative; constructors that accept external input
//! go through [`RunWindow::new`], which validates them.
//!
//! The clock only ever moves forward: [`SimClock::advance_to`] refuses to
//! step backwards.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ensure_non_negative, CoreResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulated instant, in days since the start of the run.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn days(self) -> f64 {
        self.0
    }

    /// The instant `delay` days after `self`.
    #[inline]
    pub fn after(self, delay: f64) -> SimTime {
        SimTime(self.0 + delay)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single monotonically increasing clock shared by every process.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `t`.  Returns `false` (and leaves the clock
    /// untouched) if `t` lies in the past.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) -> bool {
        if t < self.now {
            return false;
        }
        self.now = t;
        true
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.now)
    }
}

// ── RunWindow ─────────────────────────────────────────────────────────────────

/// The time window of one run: a warm-up period excluded from auditing,
/// followed by the audited period.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunWindow {
    /// Days before the first audit.  Occupancy accrues during warm-up.
    pub warm_up: f64,
    /// Days audited after warm-up.
    pub sim_duration: f64,
}

impl RunWindow {
    /// Validate and build a window.  Both values must be finite and ≥ 0.
    pub fn new(warm_up: f64, sim_duration: f64) -> CoreResult<Self> {
        Ok(Self {
            warm_up:      ensure_non_negative("warm_up", warm_up)?,
            sim_duration: ensure_non_negative("sim_duration", sim_duration)?,
        })
    }

    /// Instant of the first audit.
    #[inline]
    pub fn audit_start(&self) -> SimTime {
        SimTime(self.warm_up)
    }

    /// Exclusive end of the run: events at or after this instant never fire.
    #[inline]
    pub fn horizon(&self) -> SimTime {
        SimTime(self.warm_up + self.sim_duration)
    }
}

//! Simulation observer trait for progress reporting and data collection.

use sf_core::{RunWindow, SimTime};
use sf_pathway::{AuditReport, AuditRow, CarePathway, Patient};

/// Callbacks invoked by [`Model::run_with`][crate::Model::run_with] at key
/// points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — admissions counter
///
/// ```rust,ignore
/// struct Admissions(u64);
///
/// impl SimObserver for Admissions {
///     fn on_admission(&mut self, _now: SimTime, _patient: &Patient) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before any process runs.
    fn on_run_start(&mut self, _window: &RunWindow) {}

    /// Called when a patient is admitted, before they enter HASU.
    fn on_admission(&mut self, _now: SimTime, _patient: &Patient) {}

    /// Called when a patient leaves their last stage.
    fn on_discharge(&mut self, _now: SimTime, _patient: &Patient) {}

    /// Called after each audit snapshot is recorded.
    ///
    /// `pathway` gives read-only access to the full state at that instant.
    fn on_audit(&mut self, _row: &AuditRow, _pathway: &CarePathway) {}

    /// Called once after the clock stops and the report has been built.
    fn on_run_end(&mut self, _now: SimTime, _report: &AuditReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

//! The logical processes multiplexed onto the scheduler.
//!
//! Each variant is the continuation of a suspended process: what it does the
//! next time it runs.

use sf_core::PatientId;
use sf_pathway::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Process {
    /// Admit the next patient (straight into HASU), then wait an
    /// exponential gap.
    Arrival,
    /// Record an occupancy snapshot, then wait one day.
    Audit,
    /// One patient's journey: the stay in `leaving` has elapsed.
    Pathway { patient: PatientId, leaving: Stage },
}

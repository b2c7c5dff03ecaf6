//! `CarePathway` — the mutable state of one run.
//!
//! Holds the active population, the three occupancy counters, the
//! admissions and discharge totals, and the audit series.  Only the engine's
//! single scheduler loop mutates it, so no locking is involved.
//!
//! # Invariant
//!
//! For every stage, the occupancy counter equals the number of active
//! patients whose current stage is that stage.  [`enter`][CarePathway::enter]
//! and [`leave`][CarePathway::leave] update both sides together and refuse
//! transitions that would break the pairing.

use sf_core::{PatientId, SimTime};
use tracing::{debug, trace};

use crate::chart::{ChartOptions, ChartRenderer, OccupancyChart};
use crate::{AuditReport, AuditRow, Patient, PathwayError, PathwayResult, Population, Stage};

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// Occupied beds per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    pub hasu: u32,
    pub asu:  u32,
    pub esd:  u32,
}

impl Occupancy {
    pub fn get(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Hasu => self.hasu,
            Stage::Asu => self.asu,
            Stage::Esd => self.esd,
        }
    }

    fn slot(&mut self, stage: Stage) -> &mut u32 {
        match stage {
            Stage::Hasu => &mut self.hasu,
            Stage::Asu => &mut self.asu,
            Stage::Esd => &mut self.esd,
        }
    }

    pub fn total(&self) -> u32 {
        self.hasu + self.asu + self.esd
    }
}

// ── CarePathway ───────────────────────────────────────────────────────────────

/// One run's pathway state.  Create fresh at the start of every run.
#[derive(Default)]
pub struct CarePathway {
    population: Population,
    occupancy:  Occupancy,
    admissions: u64,
    discharges: u64,
    audit:      Vec<AuditRow>,
    report:     Option<AuditReport>,
}

impl CarePathway {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Admission and discharge ───────────────────────────────────────────

    /// Count a new admission and return the id it gets.
    pub fn next_admission(&mut self) -> PatientId {
        self.admissions += 1;
        PatientId::from_admission(self.admissions)
    }

    /// Add an admitted patient to the active population.  They occupy no
    /// stage until [`enter`][Self::enter] is called for HASU.
    pub fn register(&mut self, patient: Patient) -> PathwayResult<()> {
        self.population.insert(patient)
    }

    /// Move `id` into `stage`, incrementing its counter.  The patient must
    /// currently occupy no stage and their route must include `stage`.
    pub fn enter(&mut self, id: PatientId, stage: Stage) -> PathwayResult<()> {
        let resident = self.population.get_mut(id)?;
        if !resident.patient.uses(stage) {
            return Err(PathwayError::StageNotUsed { patient: id, stage });
        }
        if let Some(actual) = resident.stage {
            return Err(PathwayError::StageMismatch { patient: id, expected: stage, actual });
        }
        resident.stage = Some(stage);
        *self.occupancy.slot(stage) += 1;
        Ok(())
    }

    /// Take `id` out of `stage`, decrementing its counter.
    pub fn leave(&mut self, id: PatientId, stage: Stage) -> PathwayResult<()> {
        let resident = self.population.get_mut(id)?;
        match resident.stage {
            Some(actual) if actual == stage => {}
            Some(actual) => {
                return Err(PathwayError::StageMismatch { patient: id, expected: stage, actual });
            }
            None => return Err(PathwayError::StageNotUsed { patient: id, stage }),
        }
        resident.stage = None;
        *self.occupancy.slot(stage) -= 1;
        Ok(())
    }

    /// Remove a patient who has completed their last stage.  No record of
    /// the patient is kept beyond the discharge total.
    pub fn discharge(&mut self, id: PatientId) -> PathwayResult<Patient> {
        let resident = self.population.get(id).ok_or(PathwayError::UnknownPatient(id))?;
        if let Some(stage) = resident.stage {
            return Err(PathwayError::StillInStage { patient: id, stage });
        }
        let resident = self.population.remove(id)?;
        self.discharges += 1;
        trace!(patient = id.get(), los = resident.patient.total_los(), "discharged");
        Ok(resident.patient)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn admissions(&self) -> u64 {
        self.admissions
    }

    pub fn discharges(&self) -> u64 {
        self.discharges
    }

    pub fn active_patients(&self) -> usize {
        self.population.len()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// `true` when every counter matches the population's stage census.
    pub fn counters_consistent(&self) -> bool {
        Stage::ALL
            .into_iter()
            .all(|s| self.occupancy.get(s) as usize == self.population.count_in(s))
    }

    // ── Audit and reporting ───────────────────────────────────────────────

    /// Append a snapshot of the current occupancy at `time`.
    pub fn audit(&mut self, time: SimTime) -> AuditRow {
        debug_assert!(self.counters_consistent(), "occupancy counters out of sync at {time}");
        let row = AuditRow {
            time: time.days(),
            hasu: self.occupancy.hasu,
            asu:  self.occupancy.asu,
            esd:  self.occupancy.esd,
        };
        self.audit.push(row);
        row
    }

    /// Audit rows recorded so far, in time order.
    pub fn audit_rows(&self) -> &[AuditRow] {
        &self.audit
    }

    /// Build (or rebuild) the audit report from the full audit series.
    ///
    /// Rebuilding from an unchanged series yields an identical report.
    pub fn build_audit_report(&mut self) -> &AuditReport {
        let report = AuditReport::from_rows(self.audit.clone());
        debug!(rows = report.rows.len(), has_summary = report.summary.is_some(), "audit report built");
        self.report.insert(report)
    }

    /// The report from the last [`build_audit_report`][Self::build_audit_report].
    pub fn report(&self) -> Option<&AuditReport> {
        self.report.as_ref()
    }

    /// Hand the built report to `renderer`.  Builds the report first if it
    /// has not been built yet.
    pub fn render<R: ChartRenderer + ?Sized>(
        &mut self,
        renderer:   &mut R,
        options:    ChartOptions,
        day_offset: f64,
    ) -> PathwayResult<()> {
        if self.report.is_none() {
            self.build_audit_report();
        }
        let Some(report) = self.report.as_ref() else {
            return Ok(());
        };
        let chart = OccupancyChart {
            rows:       &report.rows,
            summary:    report.summary.as_ref(),
            day_offset,
            options,
        };
        renderer.render(&chart)?;
        debug!(rows = report.rows.len(), "occupancy chart rendered");
        Ok(())
    }
}

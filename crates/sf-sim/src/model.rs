//! The `Model` struct and its event loop.

use sf_core::{PatientId, RunWindow, SimRng, SimTime};
use sf_pathway::{
    AuditReport, AuditSummary, CarePathway, ChartOptions, ChartRenderer, PathwayError, Stage,
};
use sf_schedule::Scheduler;
use tracing::{info, trace};

use crate::params::{ModelParams, ResolvedParams};
use crate::process::Process;
use crate::routing::Route;
use crate::{NoopObserver, SimObserver, SimResult};

/// The simulation engine.
///
/// `Model` owns the validated parameters, the chart renderer and, after a
/// run, the [`CarePathway`] that run produced.  Each call to
/// [`run`][Self::run] drives three kinds of process over one clock:
///
/// 1. **Arrival**: admit, route, sample, register, put the patient in HASU,
///    wait an exponential gap.
/// 2. **Pathway** (one per patient): HASU, then ASU and ESD if routed there,
///    then leave the active population.
/// 3. **Audit**: wait out the warm-up, then snapshot occupancy every day.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder] or [`Model::new`].
pub struct Model {
    pub(crate) params:   ModelParams,
    pub(crate) resolved: ResolvedParams,
    pub(crate) seed:     u64,
    pub(crate) chart:    ChartOptions,
    pub(crate) renderer: Box<dyn ChartRenderer>,
    pub(crate) pathway:  CarePathway,
    pub(crate) now:      SimTime,
}

impl Model {
    /// Validate `params` and build a model with the default seed, default
    /// chart options and no renderer.
    pub fn new(params: ModelParams) -> SimResult<Self> {
        crate::ModelBuilder::new(params).build()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run for `warm_up` days unaudited, then `sim_duration` audited days.
    ///
    /// Builds the audit report and renders the chart when the clock stops.
    pub fn run(&mut self, warm_up: f64, sim_duration: f64) -> SimResult<()> {
        self.run_with(warm_up, sim_duration, &mut NoopObserver)
    }

    /// Like [`run`][Self::run], calling `observer` hooks along the way.
    ///
    /// Every run starts from a fresh [`CarePathway`] and reseeds the random
    /// stream, so repeated runs of one model give identical results.
    pub fn run_with<O: SimObserver>(
        &mut self,
        warm_up:      f64,
        sim_duration: f64,
        observer:     &mut O,
    ) -> SimResult<()> {
        let window = RunWindow::new(warm_up, sim_duration)?;
        info!(warm_up, sim_duration, seed = self.seed, "run starting");

        self.pathway = CarePathway::new();
        let mut rng = SimRng::new(self.seed);
        let mut scheduler = Scheduler::new();
        scheduler.immediately(Process::Arrival);
        scheduler.timeout(window.warm_up, Process::Audit)?;
        observer.on_run_start(&window);

        let horizon = window.horizon();
        while let Some(process) = scheduler.next_before(horizon) {
            self.step(process, &mut scheduler, &mut rng, observer)?;
        }
        self.now = scheduler.now();

        let report = self.pathway.build_audit_report();
        observer.on_run_end(self.now, report);
        self.pathway.render(&mut self.renderer, self.chart, window.warm_up)?;

        info!(
            admissions = self.pathway.admissions(),
            discharges = self.pathway.discharges(),
            active = self.pathway.active_patients(),
            audits = self.pathway.audit_rows().len(),
            "run finished"
        );
        Ok(())
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn resolved(&self) -> &ResolvedParams {
        &self.resolved
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mean days between admissions.
    pub fn inter_arrival_time(&self) -> f64 {
        self.resolved.inter_arrival.mean
    }

    /// The pathway of the most recent run (empty before the first run).
    pub fn pathway(&self) -> &CarePathway {
        &self.pathway
    }

    /// The audit report of the most recent run.
    pub fn report(&self) -> Option<&AuditReport> {
        self.pathway.report()
    }

    /// The percentile summary of the most recent run.
    pub fn summary(&self) -> Option<&AuditSummary> {
        self.report()?.summary.as_ref()
    }

    /// Simulated time at which the most recent run stopped.
    pub fn now(&self) -> SimTime {
        self.now
    }

    // ── Process steps ─────────────────────────────────────────────────────

    fn step<O: SimObserver>(
        &mut self,
        process:   Process,
        scheduler: &mut Scheduler<Process>,
        rng:       &mut SimRng,
        observer:  &mut O,
    ) -> SimResult<()> {
        match process {
            Process::Arrival => self.admit(scheduler, rng, observer),
            Process::Audit => {
                let row = self.pathway.audit(scheduler.now());
                observer.on_audit(&row, &self.pathway);
                scheduler.timeout(1.0, Process::Audit)?;
                Ok(())
            }
            Process::Pathway { patient, leaving } => {
                self.advance_pathway(patient, leaving, scheduler, observer)
            }
        }
    }

    fn admit<O: SimObserver>(
        &mut self,
        scheduler: &mut Scheduler<Process>,
        rng:       &mut SimRng,
        observer:  &mut O,
    ) -> SimResult<()> {
        let now = scheduler.now();
        let id = self.pathway.next_admission();
        let route = Route::decide(&self.resolved.routing, rng);
        let patient = self.resolved.stays.sample_patient(id, route, rng);
        trace!(patient = id.get(), t = now.days(), ?route, "admitted");

        let los_hasu = patient.los_hasu();
        observer.on_admission(now, &patient);
        self.pathway.register(patient)?;
        // HASU is entered at the admission instant, before a same-time audit.
        self.enter_stage(id, Stage::Hasu, los_hasu, scheduler)?;

        let gap = self.resolved.inter_arrival.sample(rng);
        scheduler.timeout(gap, Process::Arrival)?;
        Ok(())
    }

    fn enter_stage(
        &mut self,
        id:        PatientId,
        stage:     Stage,
        los:       f64,
        scheduler: &mut Scheduler<Process>,
    ) -> SimResult<()> {
        self.pathway.enter(id, stage)?;
        scheduler.timeout(los, Process::Pathway { patient: id, leaving: stage })?;
        Ok(())
    }

    fn advance_pathway<O: SimObserver>(
        &mut self,
        id:        PatientId,
        leaving:   Stage,
        scheduler: &mut Scheduler<Process>,
        observer:  &mut O,
    ) -> SimResult<()> {
        let patient = &self
            .pathway
            .population()
            .get(id)
            .ok_or(PathwayError::UnknownPatient(id))?
            .patient;
        let next = patient.next_stage(leaving).map(|s| (s, patient.los(s)));

        self.pathway.leave(id, leaving)?;
        match next {
            Some((stage, los)) => self.enter_stage(id, stage, los, scheduler)?,
            None => {
                let patient = self.pathway.discharge(id)?;
                observer.on_discharge(scheduler.now(), &patient);
            }
        }
        Ok(())
    }
}

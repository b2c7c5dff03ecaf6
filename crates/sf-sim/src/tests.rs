//! Integration tests for sf-sim.

use sf_core::SimTime;
use sf_pathway::{AuditRow, CarePathway, PathwayKind, Patient, Stage};

use crate::{ModelParams, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 365 admissions/year, everyone through ASU, no ESD, fixed stays.
fn asu_only_params() -> ModelParams {
    ModelParams {
        admissions_per_year:      365.0,
        prop_hasu_using_asu:      1.0,
        prop_hasu_using_esd_only: 0.0,
        prop_asu_using_esd:       0.0,
        los_hasu_mean:            2.0,
        los_hasu_cv:              0.0,
        los_asu_no_esd_mean:      5.0,
        los_asu_no_esd_cv:        0.0,
        ..ModelParams::default()
    }
}

/// Observer recording everything it is told.
#[derive(Default)]
struct Recorder {
    admissions:      Vec<(SimTime, Patient)>,
    discharges:      Vec<(SimTime, Patient)>,
    audits:          Vec<AuditRow>,
    run_ended:       bool,
}

impl SimObserver for Recorder {
    fn on_admission(&mut self, now: SimTime, patient: &Patient) {
        self.admissions.push((now, patient.clone()));
    }

    fn on_discharge(&mut self, now: SimTime, patient: &Patient) {
        self.discharges.push((now, patient.clone()));
    }

    fn on_audit(&mut self, row: &AuditRow, _pathway: &CarePathway) {
        self.audits.push(*row);
    }

    fn on_run_end(&mut self, _now: SimTime, _report: &sf_pathway::AuditReport) {
        self.run_ended = true;
    }
}

/// `[enter, leave)` interval of every stage `patient` uses, rebuilt from the
/// admission time and the sampled stays alone.
fn stage_intervals(admitted: SimTime, patient: &Patient) -> Vec<(Stage, f64, f64)> {
    let mut t = admitted.days();
    let mut out = Vec::new();
    for stage in Stage::ALL {
        if patient.uses(stage) {
            let leave = t + patient.los(stage);
            out.push((stage, t, leave));
            t = leave;
        }
    }
    out
}

/// Occupancy every audit row should show, counted from the admissions
/// alone, without looking at the pathway's counters or population.
fn expected_row(recorder: &Recorder, time: f64) -> AuditRow {
    let mut row = AuditRow { time, hasu: 0, asu: 0, esd: 0 };
    for (admitted, patient) in &recorder.admissions {
        for (stage, enter, leave) in stage_intervals(*admitted, patient) {
            if enter <= time && time < leave {
                match stage {
                    Stage::Hasu => row.hasu += 1,
                    Stage::Asu => row.asu += 1,
                    Stage::Esd => row.esd += 1,
                }
            }
        }
    }
    row
}

/// Every recorded audit row equals the occupancy implied by the stays.
fn assert_audits_match_stays(recorder: &Recorder) {
    assert!(!recorder.audits.is_empty());
    for row in &recorder.audits {
        assert_eq!(*row, expected_row(recorder, row.time), "audit at day {}", row.time);
    }
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use std::io::Cursor;

    use crate::{load_params_reader, Model, ModelParams};

    #[test]
    fn documented_defaults() {
        let p = ModelParams::default();
        assert_eq!(p.admissions_per_year, 1000.0);
        assert_eq!(p.prop_hasu_using_asu, 0.7);
        assert_eq!(p.prop_hasu_using_esd_only, 0.1);
        assert_eq!(p.prop_asu_using_esd, 0.5);
        assert_eq!(p.los_esd_mean, 20.0);
        assert!((p.inter_arrival_time() - 0.365).abs() < 1e-12);
    }

    #[test]
    fn missing_keys_default_and_unknown_keys_ignored() {
        let json = r#"{ "admissions_per_year": 500, "los_esd_cv": 0.7, "colour": "blue" }"#;
        let p = load_params_reader(Cursor::new(json)).unwrap();
        assert_eq!(p.admissions_per_year, 500.0);
        assert_eq!(p.los_esd_cv, 0.7);
        assert_eq!(p.los_hasu_mean, 2.0);
    }

    #[test]
    fn malformed_json_is_a_params_error() {
        let err = ModelParams::from_json_str(r#"{ "los_hasu_mean": "two" }"#).unwrap_err();
        assert!(matches!(err, crate::SimError::Params(_)));
    }

    #[test]
    fn invalid_values_name_the_field() {
        let cases: Vec<(ModelParams, &str)> = vec![
            (ModelParams { admissions_per_year: 0.0, ..Default::default() }, "admissions_per_year"),
            (ModelParams { prop_hasu_using_asu: 1.5, ..Default::default() }, "prop_hasu_using_asu"),
            (ModelParams { prop_asu_using_esd: -0.1, ..Default::default() }, "prop_asu_using_esd"),
            (ModelParams { prop_hasu_using_esd_only: f64::NAN, ..Default::default() }, "prop_hasu_using_esd_only"),
            (ModelParams { los_hasu_mean: 0.0, ..Default::default() }, "los_hasu_mean"),
            (ModelParams { los_asu_with_esd_cv: -1.0, ..Default::default() }, "los_asu_with_esd_cv"),
            (ModelParams { los_esd_mean: -3.0, ..Default::default() }, "los_esd_mean"),
        ];
        for (params, field) in cases {
            let err = Model::new(params).err().expect("invalid params accepted");
            assert!(err.is_invalid_parameter(), "{err}");
            assert!(err.to_string().contains(field), "{err} should name {field}");
        }
    }

    #[test]
    fn lognormal_parameters_resolved() {
        let resolved = ModelParams::default().resolve().unwrap();
        assert!((resolved.stays.hasu.sigma - 2f64.ln().sqrt()).abs() < 1e-12);
        assert_eq!(resolved.stays.esd.mean, 20.0);
        assert!((resolved.inter_arrival.mean - 0.365).abs() < 1e-12);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing_tests {
    use sf_core::{PatientId, SimRng};

    use super::*;
    use crate::Route;

    #[test]
    fn esd_flags_mutually_exclusive() {
        let routing = ModelParams {
            prop_hasu_using_asu:      0.5,
            prop_hasu_using_esd_only: 0.5,
            prop_asu_using_esd:       0.5,
            ..Default::default()
        }
        .resolve()
        .unwrap()
        .routing;
        let mut rng = SimRng::new(9);
        for _ in 0..10_000 {
            let r = Route::decide(&routing, &mut rng);
            assert!(!(r.esd_after_asu && r.esd_after_hasu));
            if r.use_asu {
                assert!(!r.esd_after_hasu);
            } else {
                assert!(!r.esd_after_asu);
            }
        }
    }

    #[test]
    fn route_proportions_follow_probabilities() {
        let resolved = ModelParams::default().resolve().unwrap();
        let mut rng = SimRng::new(1);
        let n = 100_000;
        let mut asu = 0;
        let mut esd_after_asu = 0;
        let mut esd_only = 0;
        for _ in 0..n {
            let r = Route::decide(&resolved.routing, &mut rng);
            asu += r.use_asu as u32;
            esd_after_asu += r.esd_after_asu as u32;
            esd_only += r.esd_after_hasu as u32;
        }
        let frac = |k: u32| k as f64 / n as f64;
        assert!((frac(asu) - 0.7).abs() < 0.01);
        assert!((frac(esd_after_asu) - 0.35).abs() < 0.01);
        assert!((frac(esd_only) - 0.03).abs() < 0.005);
    }

    #[test]
    fn sampled_patients_respect_zero_los_rules() {
        let resolved = ModelParams::default().resolve().unwrap();
        let mut rng = SimRng::new(5);
        for i in 1..=5_000 {
            let route = Route::decide(&resolved.routing, &mut rng);
            let p = resolved.stays.sample_patient(PatientId(i), route, &mut rng);
            assert_eq!(p.use_asu(), route.use_asu);
            assert_eq!(p.use_esd(), route.use_esd());
            if !p.use_asu() {
                assert_eq!(p.los_asu(), 0.0);
            }
            if !p.use_esd() {
                assert_eq!(p.los_esd(), 0.0);
            }
            assert!(p.los_hasu() >= 0.0 && p.los_asu() >= 0.0 && p.los_esd() >= 0.0);
        }
    }

    #[test]
    fn asu_los_uses_with_esd_distribution_when_followed_by_esd() {
        let resolved = ModelParams {
            prop_hasu_using_asu:   1.0,
            prop_asu_using_esd:    1.0,
            los_asu_no_esd_mean:   3.0,
            los_asu_no_esd_cv:     0.0,
            los_asu_with_esd_mean: 9.0,
            los_asu_with_esd_cv:   0.0,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let mut rng = SimRng::new(0);
        let route = Route::decide(&resolved.routing, &mut rng);
        let p = resolved.stays.sample_patient(PatientId(1), route, &mut rng);
        assert_eq!(p.kind(), PathwayKind::HasuAsuEsd);
        assert_eq!(p.los_asu(), 9.0);
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{Model, ModelBuilder, SimError};

    #[test]
    fn audit_rows_cover_the_audited_window() {
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run(10.0, 30.0).unwrap();
        let report = model.report().unwrap();
        assert_eq!(report.rows.len(), 30);
        assert_eq!(report.rows[0].time, 10.0);
        assert_eq!(report.rows[29].time, 39.0);
        assert!(report.rows.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(model.now(), SimTime(40.0));
    }

    #[test]
    fn audits_match_stays_after_warm_up() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(20.0, 60.0, &mut recorder).unwrap();
        assert_eq!(recorder.audits.len(), 60);
        assert_audits_match_stays(&recorder);
        assert!(recorder.run_ended);
        assert!(model.pathway().counters_consistent());
    }

    #[test]
    fn zero_warm_up_counts_first_admission_in_hasu() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(asu_only_params()).unwrap();
        model.run_with(0.0, 1.0, &mut recorder).unwrap();

        let at_zero = recorder.admissions.iter().filter(|(t, _)| *t == SimTime::ZERO).count();
        assert_eq!(at_zero, 1);
        let row = recorder.audits[0];
        assert_eq!(row.time, 0.0);
        assert_eq!((row.hasu, row.asu, row.esd), (1, 0, 0));
    }

    #[test]
    fn audits_match_stays_with_zero_warm_up() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(0.0, 120.0, &mut recorder).unwrap();
        assert!(recorder.admissions.iter().any(|(_, p)| p.use_esd()));
        assert_audits_match_stays(&recorder);
    }

    #[test]
    fn audits_match_stays_on_every_route() {
        let params = ModelParams {
            prop_hasu_using_asu:      0.5,
            prop_hasu_using_esd_only: 0.5,
            prop_asu_using_esd:       0.5,
            los_esd_cv:               0.3,
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        let mut model = ModelBuilder::new(params).seed(17).build().unwrap();
        model.run_with(30.0, 90.0, &mut recorder).unwrap();
        for kind in [
            PathwayKind::HasuOnly,
            PathwayKind::HasuEsd,
            PathwayKind::HasuAsu,
            PathwayKind::HasuAsuEsd,
        ] {
            assert!(recorder.admissions.iter().any(|(_, p)| p.kind() == kind), "{kind:?}");
        }
        assert_audits_match_stays(&recorder);
    }

    #[test]
    fn every_patient_has_exactly_one_route_kind() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(0.0, 200.0, &mut recorder).unwrap();
        assert!(!recorder.admissions.is_empty());
        for (_, p) in &recorder.admissions {
            match p.kind() {
                PathwayKind::HasuOnly => assert!(p.los_asu() == 0.0 && p.los_esd() == 0.0),
                PathwayKind::HasuEsd => assert_eq!(p.los_asu(), 0.0),
                PathwayKind::HasuAsu => assert_eq!(p.los_esd(), 0.0),
                PathwayKind::HasuAsuEsd => {}
            }
        }
    }

    #[test]
    fn ids_and_bookkeeping_add_up() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(0.0, 100.0, &mut recorder).unwrap();
        let pathway = model.pathway();
        assert_eq!(pathway.admissions(), recorder.admissions.len() as u64);
        assert_eq!(pathway.discharges(), recorder.discharges.len() as u64);
        assert_eq!(
            pathway.admissions(),
            pathway.discharges() + pathway.active_patients() as u64
        );
        let ids: Vec<u64> = recorder.admissions.iter().map(|(_, p)| p.id().get()).collect();
        assert_eq!(ids, (1..=ids.len() as u64).collect::<Vec<_>>());
    }

    #[test]
    fn discharge_happens_after_total_stay() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(0.0, 100.0, &mut recorder).unwrap();
        let admitted: std::collections::HashMap<_, _> =
            recorder.admissions.iter().map(|(t, p)| (p.id(), *t)).collect();
        for (t, p) in &recorder.discharges {
            let expected = admitted[&p.id()].days() + p.total_los();
            assert!((t.days() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn first_arrival_at_time_zero() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run_with(0.0, 1.0, &mut recorder).unwrap();
        assert_eq!(recorder.admissions[0].0, SimTime::ZERO);
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut m = ModelBuilder::new(ModelParams::default()).seed(seed).build().unwrap();
            m.run(30.0, 60.0).unwrap();
            m.report().unwrap().clone()
        };
        assert_eq!(run(3), run(3));
        assert_ne!(run(3).rows, run(4).rows);
    }

    #[test]
    fn repeated_runs_start_fresh() {
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run(30.0, 60.0).unwrap();
        let first = model.report().unwrap().clone();
        model.run(30.0, 60.0).unwrap();
        assert_eq!(model.report().unwrap(), &first);
        assert_eq!(model.pathway().audit_rows().len(), 60);
    }

    #[test]
    fn report_building_is_idempotent_after_run() {
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run(10.0, 50.0).unwrap();
        let before = *model.summary().unwrap();
        let mut pathway = std::mem::take(&mut model.pathway);
        let rebuilt = pathway.build_audit_report().summary.unwrap();
        assert_eq!(before, rebuilt);
    }

    #[test]
    fn horizon_inside_warm_up_gives_no_summary() {
        let mut model = Model::new(ModelParams::default()).unwrap();
        model.run(10.0, 0.0).unwrap();
        let report = model.report().unwrap();
        assert!(report.rows.is_empty());
        assert!(report.summary.is_none());
        assert!(model.pathway().admissions() > 0);
    }

    #[test]
    fn invalid_run_window_rejected_before_running() {
        let mut model = Model::new(ModelParams::default()).unwrap();
        let err = model.run(-1.0, 10.0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(matches!(err, SimError::Core(_)));
        assert_eq!(model.pathway().admissions(), 0);
    }

    #[test]
    fn asu_only_scenario() {
        let mut recorder = Recorder::default();
        let mut model = Model::new(asu_only_params()).unwrap();
        model.run_with(50.0, 100.0, &mut recorder).unwrap();

        assert!(recorder.admissions.iter().all(|(_, p)| p.use_asu() && !p.use_esd()));
        let report = model.report().unwrap();
        assert_eq!(report.rows.len(), 100);
        assert!(report.rows.iter().all(|r| r.esd == 0));

        let hasu = report.mean(Stage::Hasu).unwrap();
        let asu = report.mean(Stage::Asu).unwrap();
        assert!((1.0..=3.0).contains(&hasu), "HASU mean {hasu}");
        assert!((3.5..=6.5).contains(&asu), "ASU mean {asu}");

        let summary = model.summary().unwrap();
        assert_eq!(summary.esd.p95, 0.0);
    }

    #[test]
    fn asu_only_steady_state_over_long_run() {
        let mut model = Model::new(asu_only_params()).unwrap();
        model.run(50.0, 2_000.0).unwrap();
        let report = model.report().unwrap();
        let hasu = report.mean(Stage::Hasu).unwrap();
        let asu = report.mean(Stage::Asu).unwrap();
        assert!((hasu - 2.0).abs() < 0.2, "HASU mean {hasu}");
        assert!((asu - 5.0).abs() < 0.5, "ASU mean {asu}");
    }

    #[test]
    fn very_high_admission_rate_keeps_time_order() {
        let mut recorder = Recorder::default();
        let params = ModelParams { admissions_per_year: 100_000.0, ..Default::default() };
        let mut model = Model::new(params).unwrap();
        model.run_with(2.0, 3.0, &mut recorder).unwrap();

        // ~274 admissions per day over 5 days.
        assert!(recorder.admissions.len() > 1_000);
        assert!(
            recorder.admissions.windows(2).all(|w| w[0].0 < w[1].0),
            "arrivals must be strictly increasing in time"
        );
        assert_audits_match_stays(&recorder);
        assert_eq!(model.report().unwrap().rows.len(), 3);
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod replication_tests {
    use sf_core::RunWindow;

    use crate::{pooled_summary, replication_seeds, run_replications, ModelParams};

    #[test]
    fn seeds_are_deterministic_and_distinct() {
        let a = replication_seeds(42, 4);
        assert_eq!(a, replication_seeds(42, 4));
        let mut sorted = a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn replications_return_one_report_each() {
        let window = RunWindow::new(10.0, 20.0).unwrap();
        let reports = run_replications(&ModelParams::default(), 1, 3, window).unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.rows.len() == 20));
        assert_ne!(reports[0].rows, reports[1].rows);

        let again = run_replications(&ModelParams::default(), 1, 3, window).unwrap();
        assert_eq!(reports, again);

        let pooled = pooled_summary(&reports).unwrap();
        assert!(pooled.hasu.p5 <= pooled.hasu.p50 && pooled.hasu.p50 <= pooled.hasu.p95);
    }

    #[test]
    fn invalid_params_fail_before_running() {
        let window = RunWindow::new(1.0, 1.0).unwrap();
        let params = ModelParams { prop_hasu_using_asu: 2.0, ..Default::default() };
        let err = run_replications(&params, 1, 2, window).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn pooled_summary_of_nothing() {
        assert!(pooled_summary(&[]).is_none());
    }
}

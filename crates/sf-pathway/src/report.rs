//! Audit rows and the percentile summary built from them.
//!
//! The report is computed once at the end of a run and never mutated.
//! Percentiles use linear interpolation between closest ranks:
//!
//! ```text
//! h = (n - 1) * q
//! p = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! and are rounded to one decimal place, ties to even.

use crate::Stage;

/// Column headers of the tabular audit report, in row order.
pub const AUDIT_COLUMNS: [&str; 4] =
    ["Time", "Occupied_hasu_beds", "Occupied_asu_beds", "Occupied_esd_beds"];

// ── AuditRow ──────────────────────────────────────────────────────────────────

/// One audit snapshot: occupied beds per stage at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditRow {
    pub time: f64,
    pub hasu: u32,
    pub asu:  u32,
    pub esd:  u32,
}

impl AuditRow {
    pub fn count(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Hasu => self.hasu,
            Stage::Asu => self.asu,
            Stage::Esd => self.esd,
        }
    }
}

// ── Percentiles ───────────────────────────────────────────────────────────────

/// 5th, 50th and 95th percentile of one occupancy column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percentiles {
    pub p5:  f64,
    pub p50: f64,
    pub p95: f64,
}

impl Percentiles {
    /// Summarise `values`.  Returns `None` for an empty slice.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            p5:  round1(quantile_sorted(&sorted, 0.05)),
            p50: round1(quantile_sorted(&sorted, 0.50)),
            p95: round1(quantile_sorted(&sorted, 0.95)),
        })
    }
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

// ── AuditSummary ──────────────────────────────────────────────────────────────

/// Percentile summary of every stage: nine values in total.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditSummary {
    pub hasu: Percentiles,
    pub asu:  Percentiles,
    pub esd:  Percentiles,
}

impl AuditSummary {
    pub fn stage(&self, stage: Stage) -> &Percentiles {
        match stage {
            Stage::Hasu => &self.hasu,
            Stage::Asu => &self.asu,
            Stage::Esd => &self.esd,
        }
    }

    /// The nine summary entries as `(name, value)` pairs, stage-major:
    /// `hasu_5th_percentile`, `hasu_median`, `hasu_95th_percentile`, then
    /// the same for ASU and ESD.
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("hasu_5th_percentile", self.hasu.p5),
            ("hasu_median", self.hasu.p50),
            ("hasu_95th_percentile", self.hasu.p95),
            ("asu_5th_percentile", self.asu.p5),
            ("asu_median", self.asu.p50),
            ("asu_95th_percentile", self.asu.p95),
            ("esd_5th_percentile", self.esd.p5),
            ("esd_median", self.esd.p50),
            ("esd_95th_percentile", self.esd.p95),
        ]
    }

    /// Summarise a slice of audit rows.  `None` if `rows` is empty.
    pub fn from_rows(rows: &[AuditRow]) -> Option<Self> {
        let column = |stage| rows.iter().map(|r| r.count(stage) as f64).collect::<Vec<_>>();
        Some(Self {
            hasu: Percentiles::of(&column(Stage::Hasu))?,
            asu:  Percentiles::of(&column(Stage::Asu))?,
            esd:  Percentiles::of(&column(Stage::Esd))?,
        })
    }
}

// ── AuditReport ───────────────────────────────────────────────────────────────

/// The tabular audit series of a run plus its summary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditReport {
    /// Audit rows in timestamp order.
    pub rows:    Vec<AuditRow>,
    /// `None` when the run produced no audit rows.
    pub summary: Option<AuditSummary>,
}

impl AuditReport {
    pub fn from_rows(rows: Vec<AuditRow>) -> Self {
        let summary = AuditSummary::from_rows(&rows);
        Self { rows, summary }
    }

    /// Arithmetic mean occupancy of `stage`, or `None` with no rows.
    pub fn mean(&self, stage: Stage) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let total: f64 = self.rows.iter().map(|r| r.count(stage) as f64).sum();
        Some(total / self.rows.len() as f64)
    }
}

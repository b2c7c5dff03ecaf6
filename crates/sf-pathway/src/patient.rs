//! Patient records and the stages they pass through.

use std::fmt;

use sf_core::PatientId;

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One stage of the care pathway.  Patients always start in HASU; ASU and
/// ESD are each optional and, when used, follow in this order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Hyper-Acute Stroke Unit.
    Hasu,
    /// Acute Stroke Unit.
    Asu,
    /// Early Supported Discharge.
    Esd,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Hasu, Stage::Asu, Stage::Esd];

    /// Lower-case short name used in report keys and log fields.
    pub fn key(self) -> &'static str {
        match self {
            Stage::Hasu => "hasu",
            Stage::Asu => "asu",
            Stage::Esd => "esd",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Hasu => "HASU",
            Stage::Asu => "ASU",
            Stage::Esd => "ESD",
        };
        f.write_str(s)
    }
}

// ── PathwayKind ───────────────────────────────────────────────────────────────

/// The four possible routes through the pathway.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PathwayKind {
    HasuOnly,
    HasuEsd,
    HasuAsu,
    HasuAsuEsd,
}

// ── Patient ───────────────────────────────────────────────────────────────────

/// Immutable record of one patient's routing and stage durations.
///
/// Construction enforces the record's invariants: a stage that is not used
/// has a length of stay of exactly zero.  Every length of stay must be
/// finite and non-negative; debug builds assert it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    id:       PatientId,
    los_hasu: f64,
    los_asu:  f64,
    los_esd:  f64,
    use_asu:  bool,
    use_esd:  bool,
}

impl Patient {
    /// Build a patient.  `asu_los` / `esd_los` are `Some(days)` when the
    /// stage is used.
    pub fn new(id: PatientId, hasu_los: f64, asu_los: Option<f64>, esd_los: Option<f64>) -> Self {
        Self {
            id,
            los_hasu: checked(hasu_los),
            los_asu:  asu_los.map_or(0.0, checked),
            los_esd:  esd_los.map_or(0.0, checked),
            use_asu:  asu_los.is_some(),
            use_esd:  esd_los.is_some(),
        }
    }

    #[inline]
    pub fn id(&self) -> PatientId {
        self.id
    }

    #[inline]
    pub fn los_hasu(&self) -> f64 {
        self.los_hasu
    }

    #[inline]
    pub fn los_asu(&self) -> f64 {
        self.los_asu
    }

    #[inline]
    pub fn los_esd(&self) -> f64 {
        self.los_esd
    }

    #[inline]
    pub fn use_asu(&self) -> bool {
        self.use_asu
    }

    #[inline]
    pub fn use_esd(&self) -> bool {
        self.use_esd
    }

    pub fn kind(&self) -> PathwayKind {
        match (self.use_asu, self.use_esd) {
            (false, false) => PathwayKind::HasuOnly,
            (false, true) => PathwayKind::HasuEsd,
            (true, false) => PathwayKind::HasuAsu,
            (true, true) => PathwayKind::HasuAsuEsd,
        }
    }

    /// `true` if the patient's route includes `stage`.
    pub fn uses(&self, stage: Stage) -> bool {
        match stage {
            Stage::Hasu => true,
            Stage::Asu => self.use_asu,
            Stage::Esd => self.use_esd,
        }
    }

    /// Length of stay in `stage` (zero if unused).
    pub fn los(&self, stage: Stage) -> f64 {
        match stage {
            Stage::Hasu => self.los_hasu,
            Stage::Asu => self.los_asu,
            Stage::Esd => self.los_esd,
        }
    }

    /// The first used stage after `stage`, or `None` when `stage` is the
    /// patient's last.
    pub fn next_stage(&self, stage: Stage) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .skip_while(|&s| s != stage)
            .skip(1)
            .find(|&s| self.uses(s))
    }

    /// Total days from admission to leaving the pathway.
    pub fn total_los(&self) -> f64 {
        self.los_hasu + self.los_asu + self.los_esd
    }
}

fn checked(los: f64) -> f64 {
    debug_assert!(
        los.is_finite() && los >= 0.0,
        "length of stay {los} is not a finite, non-negative number of days"
    );
    los
}

//! Strongly typed patient identifier.
//!
//! Ids are assigned from the admissions counter at the moment of admission,
//! so the first patient of a run is `PatientId(1)` and ids never repeat
//! within a run.

use std::fmt;

/// Identity of one admitted patient.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientId(pub u64);

impl PatientId {
    /// Id for the `n`-th admission (1-based).
    #[inline(always)]
    pub fn from_admission(n: u64) -> Self {
        PatientId(n)
    }

    #[inline(always)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatientId({})", self.0)
    }
}

impl From<PatientId> for u64 {
    #[inline(always)]
    fn from(id: PatientId) -> u64 {
        id.0
    }
}

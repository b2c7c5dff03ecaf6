//! Active population: patients currently occupying some stage.
//!
//! Removal on pathway completion is the only deletion, and ids are never
//! reused within a run, so a plain hash map keyed by `PatientId` is enough.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use sf_core::PatientId;

use crate::{Patient, PathwayError, PathwayResult, Stage};

/// A patient together with the stage they occupy right now.
#[derive(Clone, Debug)]
pub struct Resident {
    pub patient: Patient,
    /// `None` only inside a single engine step: between registration and
    /// HASU entry, or between leaving one stage and entering the next.
    pub stage:   Option<Stage>,
}

#[derive(Default)]
pub struct Population {
    residents: HashMap<PatientId, Resident>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly admitted patient.  They occupy no stage until their
    /// pathway process enters HASU.
    pub fn insert(&mut self, patient: Patient) -> PathwayResult<()> {
        let id = patient.id();
        if self.residents.contains_key(&id) {
            return Err(PathwayError::DuplicatePatient(id));
        }
        self.residents.insert(id, Resident { patient, stage: None });
        Ok(())
    }

    pub fn get(&self, id: PatientId) -> Option<&Resident> {
        self.residents.get(&id)
    }

    pub fn get_mut(&mut self, id: PatientId) -> PathwayResult<&mut Resident> {
        self.residents.get_mut(&id).ok_or(PathwayError::UnknownPatient(id))
    }

    pub fn remove(&mut self, id: PatientId) -> PathwayResult<Resident> {
        self.residents.remove(&id).ok_or(PathwayError::UnknownPatient(id))
    }

    pub fn contains(&self, id: PatientId) -> bool {
        self.residents.contains_key(&id)
    }

    /// Number of active patients whose current stage is `stage`.  O(N).
    pub fn count_in(&self, stage: Stage) -> usize {
        self.residents.values().filter(|r| r.stage == Some(stage)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resident> {
        self.residents.values()
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }
}

use sf_core::PatientId;
use thiserror::Error;

use crate::Stage;

#[derive(Debug, Error)]
pub enum PathwayError {
    #[error("{0} is not in the active population")]
    UnknownPatient(PatientId),

    #[error("{0} is already in the active population")]
    DuplicatePatient(PatientId),

    #[error("{patient} expected in {expected} but is in {actual}")]
    StageMismatch {
        patient:  PatientId,
        expected: Stage,
        actual:   Stage,
    },

    #[error("{patient} does not use {stage}")]
    StageNotUsed { patient: PatientId, stage: Stage },

    #[error("{patient} cannot be discharged while in {stage}")]
    StillInStage { patient: PatientId, stage: Stage },

    #[error("chart rendering failed: {0}")]
    Render(#[from] std::io::Error),
}

pub type PathwayResult<T> = Result<T, PathwayError>;

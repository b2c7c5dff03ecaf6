use sf_core::CoreError;
use sf_pathway::PathwayError;
use sf_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("pathway error: {0}")]
    Pathway(#[from] PathwayError),

    #[error("parameter file error: {0}")]
    Params(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// `true` for configuration errors raised before a run starts.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SimError::Core(CoreError::InvalidParameter { .. }))
    }
}

pub type SimResult<T> = Result<T, SimError>;

use sf_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid timeout {delay} at {now}: delay must be finite and >= 0")]
    InvalidDelay { delay: f64, now: SimTime },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

//! Error types for simulator actions.

use thiserror::Error;

use crate::form::ValidationError;
use crate::schedule::ScheduleError;

/// Top-level error returned by [`Simulator::apply`](super::Simulator::apply).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("no virtual account to copy")]
    NoAccount,
}

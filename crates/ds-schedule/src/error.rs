use ds_core::{DsError, SimTime};
use thiserror::Error;

use crate::EventKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("{kind} event scheduled at {requested} is earlier than the current time {now}")]
    PastSchedule {
        kind:      EventKind,
        requested: SimTime,
        now:       SimTime,
    },

    #[error(transparent)]
    Time(#[from] DsError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

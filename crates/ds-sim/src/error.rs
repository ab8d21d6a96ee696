use ds_agent::{Activity, AgentError};
use ds_core::{DsError, SimTime, TravellerId};
use ds_pool::PoolError;
use ds_schedule::{EventKind, ScheduleError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("{0} is not an active traveller")]
    UnknownTraveller(TravellerId),

    #[error("{0} holds no box at this step")]
    MissingBox(TravellerId),

    #[error("{kind} does not apply to {id} while {activity}")]
    UnexpectedEvent {
        id:       TravellerId,
        kind:     EventKind,
        activity: Activity,
    },

    #[error("box pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("workflow error: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Config(#[from] DsError),
}

pub type SimResult<T> = Result<T, SimError>;

/// A recoverable error raised inside an event handler.
///
/// The run continues; faults are passed to `SimObserver::on_fault` and kept
/// on the controller until [`Sim::take_faults`][crate::Sim::take_faults].
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub time:  SimTime,
    pub error: SimError,
}

use ds_core::TravellerId;
use thiserror::Error;

use crate::Activity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("{id}: illegal transition {from:?} -> {to:?}")]
    InvalidTransition {
        id:   TravellerId,
        from: Activity,
        to:   Activity,
    },
}

pub type AgentResult<T> = Result<T, AgentError>;

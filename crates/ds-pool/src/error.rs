use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("box pool is empty")]
    EmptyPool,
}

pub type PoolResult<T> = Result<T, PoolError>;

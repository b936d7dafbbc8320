use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BehaviorError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

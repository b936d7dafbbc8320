use bd_behavior::BehaviorError;
use bd_core::CoreError;
use bd_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} length {got} does not match node count {expected}")]
    NodeCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("model social weight {model} differs from configured social weight {configured}")]
    SocialWeightMismatch {
        configured: f64,
        model:      f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;

use ml::MlError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RlError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("experience stream exhausted after {collected} of {requested} windows")]
    StreamExhausted { requested: usize, collected: usize },
    #[error("action {action} outside of [0, {num_actions})")]
    InvalidAction { action: usize, num_actions: usize },
    #[error(transparent)]
    Approximator(#[from] MlError),
}

impl RlError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        RlError::Config(msg.into())
    }
}

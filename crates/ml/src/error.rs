use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

impl MlError {
    pub(crate) fn shape(expected: &[usize], got: &[usize]) -> Self {
        MlError::ShapeMismatch(format!("expected {expected:?}, got {got:?}"))
    }
}

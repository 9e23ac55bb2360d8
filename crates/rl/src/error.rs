use ml::{PolicyError, TensorError};
use model::ModelError;
use thiserror::Error;

/// Failures of a rollout or of the statistics computed from one.
///
/// Configuration problems (`InvalidHorizon`, `InvalidBatchSize`) are caught
/// before any step runs; model and policy failures are passed through
/// unchanged.
#[derive(Error, Debug)]
pub enum RolloutError {
    #[error("horizon must be at least 1, got {0}")]
    InvalidHorizon(usize),
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),
    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("uptime must be finite and non-negative, got {0}")]
    InvalidUptime(f64),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

pub(crate) fn check_shape(what: &'static str, t: &ml::Tensor, expected: &[usize]) -> Result<(), RolloutError> {
    if t.shape() != expected {
        return Err(RolloutError::ShapeMismatch {
            what,
            expected: expected.to_vec(),
            actual: t.shape().to_vec(),
        });
    }
    Ok(())
}

pub(crate) fn validate_dims(horizon: usize, batch_size: usize) -> Result<(), RolloutError> {
    if batch_size == 0 {
        return Err(RolloutError::InvalidBatchSize(batch_size));
    }
    if horizon == 0 {
        return Err(RolloutError::InvalidHorizon(horizon));
    }
    Ok(())
}

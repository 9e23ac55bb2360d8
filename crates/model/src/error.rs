use ml::TensorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Tensor(#[from] TensorError),
    #[error("{what} batch has {actual} rows, expected {expected}")]
    BatchMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("fluent `{0}` is not defined")]
    MissingFluent(String),
    #[error("fluent `{name}` has {actual} values, expected {expected}")]
    FluentSize {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("zone {index} has decay {decay}; decay must be finite and non-negative")]
    InvalidDecay { index: usize, decay: f32 },
    #[error("action bounds [{low}, {high}] are empty")]
    InvalidBounds { low: f32, high: f32 },
    #[error("noise standard deviation {0} must be finite and non-negative")]
    InvalidNoise(f32),
}

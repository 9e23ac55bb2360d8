use model::ModelError;
use rl::{GridError, RolloutError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Rollout(#[from] RolloutError),
    #[error("field resolution must be at least 2, got {0}")]
    Resolution(usize),
    #[error("figure has {panels} panels, no panel {index}")]
    Panel { index: usize, panels: usize },
}

//! Batched control policies.
//!
//! A [`Policy`] maps a `[B, state_size]` batch of states (and an optional
//! timestep) to a `[B, action_size]` batch of actions. Policies never see the
//! model directly; whatever they need to know about valid actions is carried
//! by an [`ActionSpace`].

use crate::tensor::{Tensor, TensorError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error(transparent)]
    Tensor(#[from] TensorError),
    #[error("policy expected a batch of {expected} states, got {actual}")]
    BatchMismatch { expected: usize, actual: usize },
    #[error("policy `{0}` must be built and restored before it can act")]
    NotReady(&'static str),
    #[error("invalid policy configuration: {0}")]
    InvalidConfig(String),
    #[error("checkpoint does not match the policy architecture: {0}")]
    CheckpointMismatch(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Describes the actions a policy may emit.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace {
    pub size: usize,
    pub low: f32,
    pub high: f32,
    /// Action taken when nothing better is known, `size` entries.
    pub default: Vec<f32>,
}

pub trait Policy {
    fn name(&self) -> &'static str;

    /// Allocates whatever the policy needs before it can act.
    fn build(&mut self) -> Result<(), PolicyError> {
        Ok(())
    }

    /// Loads trained parameters. Policies without parameters accept any call.
    fn restore(&mut self, _checkpoint: &Path) -> Result<(), PolicyError> {
        Ok(())
    }

    /// Evaluates the policy on a batch of states.
    ///
    /// `timestep` is `None` when the caller treats the policy as
    /// time-independent, e.g. when sampling it over a spatial grid.
    fn act(&mut self, state: &Tensor, timestep: Option<usize>) -> Result<Tensor, PolicyError>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn build(&mut self) -> Result<(), PolicyError> {
        (**self).build()
    }

    fn restore(&mut self, checkpoint: &Path) -> Result<(), PolicyError> {
        (**self).restore(checkpoint)
    }

    fn act(&mut self, state: &Tensor, timestep: Option<usize>) -> Result<Tensor, PolicyError> {
        (**self).act(state, timestep)
    }
}

fn check_batch(state: &Tensor, batch_size: usize) -> Result<(), PolicyError> {
    if state.rows() != batch_size {
        return Err(PolicyError::BatchMismatch { expected: batch_size, actual: state.rows() });
    }
    Ok(())
}

/// Always emits the model's default action.
pub struct DefaultPolicy {
    space: ActionSpace,
    batch_size: usize,
}

impl DefaultPolicy {
    #[must_use]
    pub fn new(space: ActionSpace, batch_size: usize) -> Self {
        Self { space, batch_size }
    }
}

impl Policy for DefaultPolicy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn act(&mut self, state: &Tensor, _timestep: Option<usize>) -> Result<Tensor, PolicyError> {
        check_batch(state, self.batch_size)?;
        Ok(Tensor::tile_rows(&self.space.default, self.batch_size))
    }
}

/// Samples every action component uniformly within the action bounds.
pub struct RandomPolicy {
    space: ActionSpace,
    batch_size: usize,
    rng: fastrand::Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(space: ActionSpace, batch_size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { space, batch_size, rng }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn act(&mut self, state: &Tensor, _timestep: Option<usize>) -> Result<Tensor, PolicyError> {
        check_batch(state, self.batch_size)?;
        let span = self.space.high - self.space.low;
        let data = (0..self.batch_size * self.space.size)
            .map(|_| self.space.low + self.rng.f32() * span)
            .collect();
        Ok(Tensor::from_vec(vec![self.batch_size, self.space.size], data))
    }
}

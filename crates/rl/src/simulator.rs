//! Batched rollouts of a policy against a model.

use crate::error::{check_shape, validate_dims, RolloutError};
use crate::trajectory::{StepRecord, TrajectoryBundle};
use ml::{Policy, Tensor};
use model::{Model, Transition};

/// Runs `batch_size` independent trajectories of a [`Policy`] against a
/// [`Model`] in lock-step.
///
/// Batching is data parallelism inside the model and policy; the simulator
/// itself is a plain sequential loop over timesteps.
pub struct Simulator<M, P> {
    model: M,
    policy: P,
    batch_size: usize,
}

impl<M: Model, P: Policy> Simulator<M, P> {
    /// # Errors
    ///
    /// Returns [`RolloutError::InvalidBatchSize`] when `batch_size` is zero.
    pub fn new(model: M, policy: P, batch_size: usize) -> Result<Self, RolloutError> {
        if batch_size == 0 {
            return Err(RolloutError::InvalidBatchSize(batch_size));
        }
        Ok(Self { model, policy, batch_size })
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Executes `horizon` steps for every trajectory in the batch.
    ///
    /// # Errors
    ///
    /// Fails before stepping if `horizon` is zero. Model and policy errors
    /// abort the rollout and are returned unchanged; shapes that disagree
    /// with the model's fluent sizes are reported as
    /// [`RolloutError::ShapeMismatch`].
    pub fn run(&mut self, horizon: usize) -> Result<TrajectoryBundle, RolloutError> {
        validate_dims(horizon, self.batch_size)?;
        let batch = self.batch_size;
        let state_size = self.model.state_size();
        let action_size = self.model.action_size();
        let interm_size = self.model.interm_size();

        let init_row = self.model.initial_state_row()?;
        let initial_state = Tensor::tile_rows(&init_row, batch);
        check_shape("initial_state", &initial_state, &[batch, state_size])?;

        tracing::debug!(model = self.model.name(), policy = self.policy.name(), batch, horizon, "starting rollout");

        let mut steps: Vec<StepRecord> = Vec::with_capacity(horizon);
        let mut state = initial_state.clone();
        for t in 0..horizon {
            let action = self.policy.act(&state, Some(t))?;
            check_shape("action", &action, &[batch, action_size])?;

            let Transition { next_state, interm, reward } = self.model.transition(&state, &action)?;
            check_shape("next_state", &next_state, &[batch, state_size])?;
            check_shape("interm", &interm, &[batch, interm_size])?;
            check_shape("reward", &reward, &[batch])?;

            tracing::trace!(step = t, mean_reward = reward.data().iter().sum::<f32>() / batch as f32);
            steps.push(StepRecord { state, action, interm, next_state: next_state.clone(), reward });
            state = next_state;
        }

        TrajectoryBundle::from_steps(initial_state, &steps)
    }
}

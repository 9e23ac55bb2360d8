use crate::error::{check_shape, validate_dims, RolloutError};
use ml::Tensor;

/// The result of one batched rollout.
///
/// All sequences are batch-major, `[batch_size, horizon, width]`, except
/// `initial_state` (`[batch_size, state_size]`) and `rewards`
/// (`[batch_size, horizon]`). `states[b, t]` is the state the action at `t`
/// was taken in, `next_states[b, t]` the state it led to.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryBundle {
    initial_state: Tensor,
    actions: Tensor,
    states: Tensor,
    interms: Tensor,
    next_states: Tensor,
    rewards: Tensor,
}

/// Per-step outputs collected time-major during a rollout.
pub(crate) struct StepRecord {
    pub state: Tensor,
    pub action: Tensor,
    pub interm: Tensor,
    pub next_state: Tensor,
    pub reward: Tensor,
}

impl TrajectoryBundle {
    /// Assembles a bundle, checking every sequence against the shared
    /// batch size and horizon.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::ShapeMismatch`] naming the first sequence
    /// whose shape disagrees with `initial_state` and `rewards`.
    pub fn new(
        initial_state: Tensor,
        actions: Tensor,
        states: Tensor,
        interms: Tensor,
        next_states: Tensor,
        rewards: Tensor,
    ) -> Result<Self, RolloutError> {
        let &[batch, horizon] = rewards.shape() else {
            return Err(RolloutError::ShapeMismatch {
                what: "rewards",
                expected: vec![initial_state.rows(), actions.shape().get(1).copied().unwrap_or(0)],
                actual: rewards.shape().to_vec(),
            });
        };
        validate_dims(horizon, batch)?;
        let state_size = initial_state.row_len();
        check_shape("initial_state", &initial_state, &[batch, state_size])?;
        check_shape("states", &states, &[batch, horizon, state_size])?;
        check_shape("next_states", &next_states, &[batch, horizon, state_size])?;
        let action_size = actions.shape().get(2).copied().unwrap_or(0);
        check_shape("actions", &actions, &[batch, horizon, action_size])?;
        let interm_size = interms.shape().get(2).copied().unwrap_or(0);
        check_shape("interms", &interms, &[batch, horizon, interm_size])?;
        Ok(Self { initial_state, actions, states, interms, next_states, rewards })
    }

    /// Transposes time-major step records into a batch-major bundle.
    pub(crate) fn from_steps(initial_state: Tensor, steps: &[StepRecord]) -> Result<Self, RolloutError> {
        let batch = initial_state.rows();
        let horizon = steps.len();
        let actions = gather(steps, batch, |s| &s.action);
        let states = gather(steps, batch, |s| &s.state);
        let interms = gather(steps, batch, |s| &s.interm);
        let next_states = gather(steps, batch, |s| &s.next_state);
        let rewards = gather(steps, batch, |s| &s.reward).reshape(vec![batch, horizon])?;
        Self::new(initial_state, actions, states, interms, next_states, rewards)
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.rewards.shape()[0]
    }

    #[must_use]
    pub fn horizon(&self) -> usize {
        self.rewards.shape()[1]
    }

    #[must_use]
    pub fn initial_state(&self) -> &Tensor {
        &self.initial_state
    }

    #[must_use]
    pub fn actions(&self) -> &Tensor {
        &self.actions
    }

    #[must_use]
    pub fn states(&self) -> &Tensor {
        &self.states
    }

    #[must_use]
    pub fn interms(&self) -> &Tensor {
        &self.interms
    }

    #[must_use]
    pub fn next_states(&self) -> &Tensor {
        &self.next_states
    }

    #[must_use]
    pub fn rewards(&self) -> &Tensor {
        &self.rewards
    }

    fn step<'a>(&self, t: &'a Tensor, b: usize, step: usize) -> &'a [f32] {
        let width = t.shape()[2];
        let start = (b * self.horizon() + step) * width;
        &t.data()[start..start + width]
    }

    #[must_use]
    pub fn state(&self, b: usize, t: usize) -> &[f32] {
        self.step(&self.states, b, t)
    }

    #[must_use]
    pub fn action(&self, b: usize, t: usize) -> &[f32] {
        self.step(&self.actions, b, t)
    }

    #[must_use]
    pub fn interm(&self, b: usize, t: usize) -> &[f32] {
        self.step(&self.interms, b, t)
    }

    #[must_use]
    pub fn next_state(&self, b: usize, t: usize) -> &[f32] {
        self.step(&self.next_states, b, t)
    }

    #[must_use]
    pub fn reward(&self, b: usize, t: usize) -> f32 {
        self.rewards.data()[b * self.horizon() + t]
    }
}

fn gather(steps: &[StepRecord], batch: usize, pick: fn(&StepRecord) -> &Tensor) -> Tensor {
    let horizon = steps.len();
    let width = steps.first().map_or(0, |s| pick(s).row_len());
    let mut data = Vec::with_capacity(batch * horizon * width);
    for b in 0..batch {
        for step in steps {
            data.extend_from_slice(pick(step).row(b));
        }
    }
    Tensor::from_vec(vec![batch, horizon, width], data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(batch: usize, horizon: usize) -> Result<TrajectoryBundle, RolloutError> {
        TrajectoryBundle::new(
            Tensor::zeros(vec![batch, 2]),
            Tensor::zeros(vec![batch, horizon, 2]),
            Tensor::zeros(vec![batch, horizon, 2]),
            Tensor::zeros(vec![batch, horizon, 0]),
            Tensor::zeros(vec![batch, horizon, 2]),
            Tensor::zeros(vec![batch, horizon]),
        )
    }

    #[test]
    fn accepts_consistent_shapes() {
        let b = bundle(3, 5).unwrap();
        assert_eq!(b.batch_size(), 3);
        assert_eq!(b.horizon(), 5);
        assert!(b.interm(2, 4).is_empty());
    }

    #[test]
    fn rejects_mismatched_horizon() {
        let err = TrajectoryBundle::new(
            Tensor::zeros(vec![2, 2]),
            Tensor::zeros(vec![2, 4, 2]),
            Tensor::zeros(vec![2, 3, 2]),
            Tensor::zeros(vec![2, 3, 0]),
            Tensor::zeros(vec![2, 3, 2]),
            Tensor::zeros(vec![2, 3]),
        )
        .unwrap_err();
        assert!(matches!(err, RolloutError::ShapeMismatch { what: "actions", .. }));
    }

    #[test]
    fn rejects_empty_horizon() {
        assert!(matches!(bundle(2, 0), Err(RolloutError::InvalidHorizon(0))));
    }
}

use ml::Tensor;
use model::{FluentSpec, Fluents, Model, ModelError, Transition};

/// One-dimensional random walk that pays a constant reward every step.
pub struct ConstantRewardModel {
    pub reward: f32,
    state: Vec<FluentSpec>,
    action: Vec<FluentSpec>,
    interm: Vec<FluentSpec>,
}

impl ConstantRewardModel {
    pub fn new(reward: f32) -> Self {
        Self {
            reward,
            state: vec![FluentSpec::new("position/1", 1)],
            action: vec![FluentSpec::new("push/1", 1)],
            interm: vec![FluentSpec::new("speed/1", 1)],
        }
    }
}

impl Model for ConstantRewardModel {
    fn name(&self) -> &str {
        "constant-reward"
    }

    fn state_fluents(&self) -> &[FluentSpec] {
        &self.state
    }

    fn action_fluents(&self) -> &[FluentSpec] {
        &self.action
    }

    fn interm_fluents(&self) -> &[FluentSpec] {
        &self.interm
    }

    fn non_fluents(&self) -> Fluents {
        Fluents::new()
    }

    fn initial_state(&self) -> Fluents {
        let mut f = Fluents::new();
        f.insert("position/1", Tensor::from_vec(vec![1], vec![0.0]));
        f
    }

    fn default_action(&self) -> Vec<f32> {
        vec![1.0]
    }

    fn action_bounds(&self) -> (f32, f32) {
        (-1.0, 1.0)
    }

    fn transition(&mut self, state: &Tensor, action: &Tensor) -> Result<Transition, ModelError> {
        let batch = state.expect_matrix(1)?;
        let rows = action.expect_matrix(1)?;
        if rows != batch {
            return Err(ModelError::BatchMismatch { what: "action", expected: batch, actual: rows });
        }
        let next: Vec<f32> = state.data().iter().zip(action.data()).map(|(s, a)| s + a).collect();
        Ok(Transition {
            next_state: Tensor::from_vec(vec![batch, 1], next),
            interm: Tensor::from_vec(vec![batch, 1], action.data().to_vec()),
            reward: Tensor::filled(vec![batch], self.reward),
        })
    }
}

use crate::error::ModelError;
use crate::fluent::{FluentSpec, Fluents};
use ml::Tensor;

/// One batched transition step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// `[B, state_size]`
    pub next_state: Tensor,
    /// `[B, interm_size]`
    pub interm: Tensor,
    /// `[B]`
    pub reward: Tensor,
}

/// Stochastic, batched transition/reward model.
///
/// Every batched method works on a leading batch axis: `state` is
/// `[B, state_size]` and `action` is `[B, action_size]`. The model owns its
/// random number generator, so reproducibility is configured when the model
/// is built, not by whoever steps it.
pub trait Model {
    fn name(&self) -> &str;

    fn state_fluents(&self) -> &[FluentSpec];
    fn action_fluents(&self) -> &[FluentSpec];
    fn interm_fluents(&self) -> &[FluentSpec];

    /// Static, episode-invariant parameters.
    fn non_fluents(&self) -> Fluents;

    /// Unbatched initial value of every state fluent.
    fn initial_state(&self) -> Fluents;

    fn default_action(&self) -> Vec<f32>;

    /// Inclusive `(low, high)` bounds shared by every action component.
    fn action_bounds(&self) -> (f32, f32);

    /// Advances a batch of states by one step.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if `state` or `action` do not have the
    /// documented shapes or disagree on the batch size.
    fn transition(&mut self, state: &Tensor, action: &Tensor) -> Result<Transition, ModelError>;

    fn state_size(&self) -> usize {
        self.state_fluents().iter().map(|f| f.size).sum()
    }

    fn action_size(&self) -> usize {
        self.action_fluents().iter().map(|f| f.size).sum()
    }

    fn interm_size(&self) -> usize {
        self.interm_fluents().iter().map(|f| f.size).sum()
    }

    /// Initial state flattened in `state_fluents` order.
    fn initial_state_row(&self) -> Result<Vec<f32>, ModelError> {
        self.initial_state().flatten(self.state_fluents())
    }
}

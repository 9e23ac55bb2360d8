use ml::{ActionSpace, DefaultPolicy, Policy, RandomPolicy};
use model::Model;

/// The action space a policy needs to act on `model`.
pub fn action_space<M: Model + ?Sized>(model: &M) -> ActionSpace {
    let (low, high) = model.action_bounds();
    ActionSpace { size: model.action_size(), low, high, default: model.default_action() }
}

/// Parameter-free policies selectable by name at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Default,
    Random,
}

impl PolicyKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Default => "default",
            PolicyKind::Random => "random",
        }
    }

    /// Builds the policy for `batch_size` states of `model`. `seed` only
    /// affects [`PolicyKind::Random`].
    pub fn build<M: Model + ?Sized>(self, model: &M, batch_size: usize, seed: Option<u64>) -> Box<dyn Policy> {
        let space = action_space(model);
        match self {
            PolicyKind::Default => Box::new(DefaultPolicy::new(space, batch_size)),
            PolicyKind::Random => Box::new(RandomPolicy::new(space, batch_size, seed)),
        }
    }
}

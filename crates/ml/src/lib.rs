//! # ML building blocks
//!
//! Tensors, dense layers and the batched [`Policy`] abstraction used by the
//! rollout engine and the policy-field plots.
//!
//! -   [`tensor`]: a minimal row-major `f32` tensor with batch-leading shapes.
//! -   [`nn`]: dense layers, activations and layer normalisation.
//! -   [`policy`]: the [`Policy`] trait plus the parameter-free
//!     [`DefaultPolicy`] and [`RandomPolicy`].
//! -   [`feedforward`]: a trained MLP policy restored from a JSON checkpoint.

pub mod feedforward;
pub mod nn;
pub mod policy;
pub mod tensor;

pub use feedforward::{FeedforwardConfig, FeedforwardPolicy};
pub use nn::{Activation, Dense, Layer, LayerNorm};
pub use policy::{ActionSpace, DefaultPolicy, Policy, PolicyError, RandomPolicy};
pub use tensor::{Tensor, TensorError};

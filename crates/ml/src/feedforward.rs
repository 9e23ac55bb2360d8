//! Multi-layer perceptron policy restored from a JSON checkpoint.
//!
//! The architecture is described by a small JSON document:
//!
//! ```json
//! { "layers": [64, 32], "activation": "elu", "input_layer_norm": false }
//! ```
//!
//! and trained parameters live in a separate checkpoint file listing one
//! `{ "weights": [...], "bias": [...] }` entry per dense layer (hidden layers
//! first, output layer last), weights stored `[out, in]` row-major. The
//! output layer is squashed with `tanh` and rescaled into the action bounds.

use crate::nn::{Activation, Dense, Layer, LayerNorm};
use crate::policy::{ActionSpace, Policy, PolicyError};
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed for the placeholder weights that `restore` overwrites.
const INIT_SEED: u64 = 0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedforwardConfig {
    /// Hidden layer widths, input side first.
    pub layers: Vec<usize>,
    #[serde(default)]
    pub activation: Activation,
    #[serde(default)]
    pub input_layer_norm: bool,
}

impl FeedforwardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let json = read(path)?;
        Self::from_json(&json).map_err(|source| PolicyError::Json { path: path.to_path_buf(), source })
    }
}

#[derive(Clone, Debug, Deserialize)]
struct DenseParams {
    weights: Vec<f32>,
    bias: Vec<f32>,
}

#[derive(Clone, Debug, Deserialize)]
struct NormParams {
    gamma: Vec<f32>,
    beta: Vec<f32>,
}

#[derive(Clone, Debug, Deserialize)]
struct Checkpoint {
    #[serde(default)]
    input_layer_norm: Option<NormParams>,
    layers: Vec<DenseParams>,
}

fn read(path: &Path) -> Result<String, PolicyError> {
    fs::read_to_string(path).map_err(|source| PolicyError::Io { path: path.to_path_buf(), source })
}

struct Network {
    norm: Option<LayerNorm>,
    hidden: Vec<Dense>,
    output: Dense,
}

pub struct FeedforwardPolicy {
    config: FeedforwardConfig,
    space: ActionSpace,
    state_size: usize,
    net: Option<Network>,
    restored: bool,
}

impl FeedforwardPolicy {
    #[must_use]
    pub fn new(config: FeedforwardConfig, state_size: usize, space: ActionSpace) -> Self {
        Self { config, space, state_size, net: None, restored: false }
    }

    /// Layer widths from input to output.
    #[must_use]
    pub fn dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.config.layers.len() + 2);
        dims.push(self.state_size);
        dims.extend_from_slice(&self.config.layers);
        dims.push(self.space.size);
        dims
    }

    fn is_ready(&self) -> bool {
        self.net.is_some() && self.restored
    }

    fn rescale(&self, v: f32) -> f32 {
        let t = v.tanh();
        self.space.low + (t + 1.0) * 0.5 * (self.space.high - self.space.low)
    }
}

impl Policy for FeedforwardPolicy {
    fn name(&self) -> &'static str {
        "feedforward"
    }

    fn build(&mut self) -> Result<(), PolicyError> {
        if let Some(width) = self.config.layers.iter().find(|&&w| w == 0) {
            return Err(PolicyError::InvalidConfig(format!("layer width must be positive, got {width}")));
        }
        if self.state_size == 0 || self.space.size == 0 {
            return Err(PolicyError::InvalidConfig("state and action sizes must be positive".into()));
        }
        let rng = fastrand::Rng::with_seed(INIT_SEED);
        let dims = self.dims();
        let mut layers: Vec<Dense> = dims.windows(2).map(|w| Dense::random(w[0], w[1], &rng)).collect();
        let output = layers.pop().ok_or_else(|| PolicyError::InvalidConfig("empty network".into()))?;
        let norm = self.config.input_layer_norm.then(|| LayerNorm::identity(self.state_size));
        tracing::debug!(?dims, activation = ?self.config.activation, "built feedforward policy");
        self.net = Some(Network { norm, hidden: layers, output });
        self.restored = false;
        Ok(())
    }

    fn restore(&mut self, checkpoint: &Path) -> Result<(), PolicyError> {
        let json = read(checkpoint)?;
        let params: Checkpoint = serde_json::from_str(&json)
            .map_err(|source| PolicyError::Json { path: checkpoint.to_path_buf(), source })?;

        let dims = self.dims();
        let net = self.net.as_mut().ok_or(PolicyError::NotReady("feedforward"))?;
        if params.layers.len() != dims.len() - 1 {
            return Err(PolicyError::CheckpointMismatch(format!(
                "expected {} dense layers, checkpoint has {}",
                dims.len() - 1,
                params.layers.len()
            )));
        }

        let mut dense = Vec::with_capacity(params.layers.len());
        for (i, (p, w)) in params.layers.into_iter().zip(dims.windows(2)).enumerate() {
            let layer = Dense::new(p.weights, p.bias, w[0], w[1])
                .map_err(|e| PolicyError::CheckpointMismatch(format!("layer {i}: {e}")))?;
            dense.push(layer);
        }

        let norm = match (self.config.input_layer_norm, params.input_layer_norm) {
            (false, _) => None,
            (true, None) => {
                return Err(PolicyError::CheckpointMismatch("missing input_layer_norm parameters".into()))
            }
            (true, Some(n)) => {
                if n.gamma.len() != self.state_size || n.beta.len() != self.state_size {
                    return Err(PolicyError::CheckpointMismatch(format!(
                        "input_layer_norm expects {} parameters per vector",
                        self.state_size
                    )));
                }
                Some(LayerNorm { gamma: n.gamma, beta: n.beta, eps: 1e-6 })
            }
        };

        // dims.len() >= 2, so there is always an output layer
        if let Some(output) = dense.pop() {
            net.output = output;
        }
        net.hidden = dense;
        net.norm = norm;
        self.restored = true;
        tracing::info!(checkpoint = %checkpoint.display(), "restored policy parameters");
        Ok(())
    }

    fn act(&mut self, state: &Tensor, _timestep: Option<usize>) -> Result<Tensor, PolicyError> {
        if !self.is_ready() {
            return Err(PolicyError::NotReady("feedforward"));
        }
        let Some(net) = self.net.as_ref() else {
            return Err(PolicyError::NotReady("feedforward"));
        };
        let mut x = match &net.norm {
            Some(norm) => norm.forward(state)?,
            None => {
                state.expect_matrix(self.state_size)?;
                state.clone()
            }
        };
        for layer in &net.hidden {
            x = layer.forward(&x)?;
            x = self.config.activation.forward(&x)?;
        }
        let out = net.output.forward(&x)?;
        Ok(out.map(|v| self.rescale(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> ActionSpace {
        ActionSpace { size: 2, low: -1.0, high: 1.0, default: vec![0.0, 0.0] }
    }

    #[test]
    fn config_defaults() {
        let cfg = FeedforwardConfig::from_json(r#"{ "layers": [8, 4] }"#).unwrap();
        assert_eq!(cfg.activation, Activation::Elu);
        assert!(!cfg.input_layer_norm);
    }

    #[test]
    fn act_before_restore_fails() {
        let cfg = FeedforwardConfig { layers: vec![4], activation: Activation::Relu, input_layer_norm: false };
        let mut policy = FeedforwardPolicy::new(cfg, 2, space());
        policy.build().unwrap();
        let err = policy.act(&Tensor::zeros(vec![3, 2]), None).unwrap_err();
        assert!(matches!(err, PolicyError::NotReady(_)));
    }

    #[test]
    fn zero_width_layer_is_rejected() {
        let cfg = FeedforwardConfig { layers: vec![0], activation: Activation::Relu, input_layer_norm: false };
        let mut policy = FeedforwardPolicy::new(cfg, 2, space());
        assert!(matches!(policy.build(), Err(PolicyError::InvalidConfig(_))));
    }
}

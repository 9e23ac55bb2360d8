use crate::tensor::{Tensor, TensorError};
use serde::{Deserialize, Serialize};

/// A batched feed-forward layer: `[B, in] -> [B, out]`.
pub trait Layer {
    fn forward(&self, x: &Tensor) -> Result<Tensor, TensorError>;
}

/// A fully connected neural network layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    /// Weight matrix, `[out_dim, in_dim]` row-major.
    pub w: Tensor,
    /// Bias vector, `[out_dim]`.
    pub b: Tensor,
    pub in_dim: usize,
    pub out_dim: usize,
}

impl Dense {
    /// Creates a new `Dense` layer with the given weights and biases.
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_d: usize, out_d: usize) -> Result<Self, TensorError> {
        Ok(Self {
            w: Tensor::try_from_vec(vec![out_d, in_d], weights)?,
            b: Tensor::try_from_vec(vec![out_d], bias)?,
            in_dim: in_d,
            out_dim: out_d,
        })
    }

    /// Glorot-uniform initialisation with zero bias.
    pub fn random(in_d: usize, out_d: usize, rng: &fastrand::Rng) -> Self {
        let limit = (6.0 / (in_d + out_d).max(1) as f32).sqrt();
        let weights = (0..in_d * out_d)
            .map(|_| rng.f32() * 2.0 * limit - limit)
            .collect();
        Self {
            w: Tensor::from_vec(vec![out_d, in_d], weights),
            b: Tensor::zeros(vec![out_d]),
            in_dim: in_d,
            out_dim: out_d,
        }
    }
}

impl Layer for Dense {
    fn forward(&self, x: &Tensor) -> Result<Tensor, TensorError> {
        let batch = x.expect_matrix(self.in_dim)?;
        let w = self.w.data();
        let b = self.b.data();
        let mut y = Vec::with_capacity(batch * self.out_dim);
        for row in x.iter_rows() {
            for o in 0..self.out_dim {
                let weights = &w[o * self.in_dim..(o + 1) * self.in_dim];
                let sum: f32 = weights.iter().zip(row).map(|(wi, xi)| wi * xi).sum();
                y.push(sum + b[o]);
            }
        }
        Ok(Tensor::from_vec(vec![batch, self.out_dim], y))
    }
}

/// Element-wise non-linearities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    #[default]
    Elu,
    Tanh,
    Sigmoid,
}

impl Activation {
    #[must_use]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            Activation::Linear => v,
            Activation::Relu => v.max(0.0),
            Activation::Elu => {
                if v > 0.0 {
                    v
                } else {
                    v.exp() - 1.0
                }
            }
            Activation::Tanh => v.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-v).exp()),
        }
    }
}

impl Layer for Activation {
    fn forward(&self, x: &Tensor) -> Result<Tensor, TensorError> {
        Ok(x.map(|v| self.apply(v)))
    }
}

/// Per-row normalisation with a learned affine transform.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerNorm {
    pub gamma: Vec<f32>,
    pub beta: Vec<f32>,
    pub eps: f32,
}

impl LayerNorm {
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        Self { gamma: vec![1.0; dim], beta: vec![0.0; dim], eps: 1e-6 }
    }
}

impl Layer for LayerNorm {
    fn forward(&self, x: &Tensor) -> Result<Tensor, TensorError> {
        let dim = self.gamma.len();
        let batch = x.expect_matrix(dim)?;
        let mut out = Vec::with_capacity(batch * dim);
        for row in x.iter_rows() {
            let mean = row.iter().sum::<f32>() / dim as f32;
            let var = row.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / dim as f32;
            let inv = 1.0 / (var + self.eps).sqrt();
            for (i, v) in row.iter().enumerate() {
                out.push((v - mean) * inv * self.gamma[i] + self.beta[i]);
            }
        }
        Ok(Tensor::from_vec(vec![batch, dim], out))
    }
}

//! Policy actions sampled over a state grid.

use crate::grid::{check_square, GridError, GridSamplePoints};
use ml::{Policy, PolicyError, Tensor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("policy returned actions of shape {actual:?} for {points} grid points, expected [{points}, 2]")]
    Actions { points: usize, actual: Vec<usize> },
}

/// A grid point paired with the action the policy takes there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    pub state: [f32; 2],
    pub action: [f32; 2],
}

/// Index-aligned grid points and actions.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSamples {
    npoints: usize,
    samples: Vec<FieldSample>,
}

/// Samples reshaped into an `n × n` grid for streamline integration.
///
/// `u` and `v` are row-major over y: the action at `(xs[i], ys[j])` is
/// `(u[j * n + i], v[j * n + i])`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid {
    pub n: usize,
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
    pub u: Vec<f32>,
    pub v: Vec<f32>,
}

impl FieldSamples {
    /// # Errors
    ///
    /// `actions` must be `[points.len(), 2]`.
    pub fn new(points: &GridSamplePoints, actions: &Tensor) -> Result<Self, FieldError> {
        let count = points.len();
        if actions.shape() != [count, 2] {
            return Err(FieldError::Actions { points: count, actual: actions.shape().to_vec() });
        }
        let samples = points
            .points()
            .iter()
            .zip(actions.iter_rows())
            .map(|(&state, a)| FieldSample { state, action: [a[0], a[1]] })
            .collect();
        Ok(Self { npoints: points.npoints(), samples })
    }

    #[must_use]
    pub fn samples(&self) -> &[FieldSample] {
        &self.samples
    }

    #[must_use]
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Undoes the x-outer / y-inner sampling order.
    ///
    /// # Errors
    ///
    /// Fails unless the sample count is exactly `npoints²`.
    pub fn as_grid(&self) -> Result<FieldGrid, GridError> {
        let n = self.npoints;
        check_square(self.samples.len(), n)?;
        let xs = (0..n).map(|i| self.samples[i * n].state[0]).collect();
        let ys = (0..n).map(|j| self.samples[j].state[1]).collect();
        let mut u = vec![0.0; n * n];
        let mut v = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                let s = &self.samples[i * n + j];
                u[j * n + i] = s.action[0];
                v[j * n + i] = s.action[1];
            }
        }
        Ok(FieldGrid { n, xs, ys, u, v })
    }
}

/// Evaluates `policy` once on the whole grid, with no timestep.
///
/// The policy must already be built and restored.
pub fn evaluate<P: Policy + ?Sized>(policy: &mut P, points: &GridSamplePoints) -> Result<FieldSamples, FieldError> {
    tracing::debug!(policy = policy.name(), points = points.len(), "evaluating policy field");
    let actions = policy.act(&points.to_tensor(), None)?;
    FieldSamples::new(points, &actions)
}

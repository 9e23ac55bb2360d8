//! The Navigation domain: an agent moves through the plane towards a goal
//! while deceleration zones scale its step size down.
//!
//! Per step, for every zone `z`:
//!
//! ```text
//! distance(z)     = ‖location − center(z)‖
//! deceleration(z) = 2 / (1 + exp(−decay(z) · distance(z))) − 1
//! location'       = location + Π_z deceleration(z) · clip(move) + N(0, σ²)
//! reward          = −‖GOAL − location'‖
//! ```

use crate::env::{Model, Transition};
use crate::error::ModelError;
use crate::fluent::{FluentSpec, Fluents};
use crate::zone::{
    validate_zones, Zone, DECELERATION, DISTANCE, GOAL, LOCATION, MAX_ACTION_BOUND, MIN_ACTION_BOUND,
    MOVE, ZONE_CENTER, ZONE_DECAY,
};
use ml::Tensor;

/// Everything needed to instantiate a [`NavigationModel`].
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationParams {
    pub name: String,
    pub goal: [f32; 2],
    pub start: [f32; 2],
    pub zones: Vec<Zone>,
    pub action_bounds: (f32, f32),
    pub noise_stddev: f32,
    pub seed: Option<u64>,
}

pub struct NavigationModel {
    params: NavigationParams,
    state_fluents: Vec<FluentSpec>,
    action_fluents: Vec<FluentSpec>,
    interm_fluents: Vec<FluentSpec>,
    rng: fastrand::Rng,
}

impl NavigationModel {
    /// # Errors
    ///
    /// Rejects negative or non-finite zone decay, empty action bounds and
    /// invalid noise.
    pub fn new(params: NavigationParams) -> Result<Self, ModelError> {
        validate_zones(&params.zones)?;
        let (low, high) = params.action_bounds;
        if !(low < high) {
            return Err(ModelError::InvalidBounds { low, high });
        }
        if !params.noise_stddev.is_finite() || params.noise_stddev < 0.0 {
            return Err(ModelError::InvalidNoise(params.noise_stddev));
        }
        let rng = match params.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let n_zones = params.zones.len();
        tracing::debug!(name = %params.name, zones = n_zones, "navigation model ready");
        Ok(Self {
            state_fluents: vec![FluentSpec::new(LOCATION, 2)],
            action_fluents: vec![FluentSpec::new(MOVE, 2)],
            interm_fluents: vec![FluentSpec::new(DISTANCE, n_zones), FluentSpec::new(DECELERATION, n_zones)],
            params,
            rng,
        })
    }

    /// Standard normal sample (Box-Muller).
    fn gaussian(&self) -> f32 {
        let u1 = self.rng.f32().max(f32::MIN_POSITIVE);
        let u2 = self.rng.f32();
        (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
    }
}

impl Model for NavigationModel {
    fn name(&self) -> &str {
        &self.params.name
    }

    fn state_fluents(&self) -> &[FluentSpec] {
        &self.state_fluents
    }

    fn action_fluents(&self) -> &[FluentSpec] {
        &self.action_fluents
    }

    fn interm_fluents(&self) -> &[FluentSpec] {
        &self.interm_fluents
    }

    fn non_fluents(&self) -> Fluents {
        let p = &self.params;
        let n = p.zones.len();
        let centers = p.zones.iter().flat_map(|z| [z.center_x, z.center_y]).collect();
        let decays = p.zones.iter().map(|z| z.decay).collect();

        let mut f = Fluents::new();
        f.insert(GOAL, Tensor::from_vec(vec![2], p.goal.to_vec()));
        f.insert(ZONE_CENTER, Tensor::from_vec(vec![n, 2], centers));
        f.insert(ZONE_DECAY, Tensor::from_vec(vec![n], decays));
        f.insert(MIN_ACTION_BOUND, Tensor::from_vec(vec![], vec![p.action_bounds.0]));
        f.insert(MAX_ACTION_BOUND, Tensor::from_vec(vec![], vec![p.action_bounds.1]));
        f
    }

    fn initial_state(&self) -> Fluents {
        let mut f = Fluents::new();
        f.insert(LOCATION, Tensor::from_vec(vec![2], self.params.start.to_vec()));
        f
    }

    fn default_action(&self) -> Vec<f32> {
        vec![0.0, 0.0]
    }

    fn action_bounds(&self) -> (f32, f32) {
        self.params.action_bounds
    }

    fn transition(&mut self, state: &Tensor, action: &Tensor) -> Result<Transition, ModelError> {
        let batch = state.expect_matrix(2)?;
        let action_rows = action.expect_matrix(2)?;
        if action_rows != batch {
            return Err(ModelError::BatchMismatch { what: "action", expected: batch, actual: action_rows });
        }

        let p = &self.params;
        let n_zones = p.zones.len();
        let (low, high) = p.action_bounds;
        let mut next = Vec::with_capacity(batch * 2);
        let mut interm = Vec::with_capacity(batch * 2 * n_zones);
        let mut reward = Vec::with_capacity(batch);

        for (loc, mv) in state.iter_rows().zip(action.iter_rows()) {
            let (x, y) = (loc[0], loc[1]);
            let distances: Vec<f32> = p.zones.iter().map(|z| z.distance(x, y)).collect();
            let decelerations: Vec<f32> = p
                .zones
                .iter()
                .zip(&distances)
                .map(|(z, &d)| crate::zone::attenuation(z.decay, d))
                .collect();
            let lambda: f32 = decelerations.iter().product();

            let nx = x + lambda * mv[0].clamp(low, high) + p.noise_stddev * self.gaussian();
            let ny = y + lambda * mv[1].clamp(low, high) + p.noise_stddev * self.gaussian();

            next.extend_from_slice(&[nx, ny]);
            interm.extend(distances);
            interm.extend(decelerations);
            reward.push(-((p.goal[0] - nx).powi(2) + (p.goal[1] - ny).powi(2)).sqrt());
        }

        Ok(Transition {
            next_state: Tensor::from_vec(vec![batch, 2], next),
            interm: Tensor::from_vec(vec![batch, 2 * n_zones], interm),
            reward: Tensor::from_vec(vec![batch], reward),
        })
    }
}

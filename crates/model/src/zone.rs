//! Deceleration zones and the navigation non-fluents built from them.

use crate::env::Model;
use crate::error::ModelError;
use crate::fluent::Fluents;

pub const GOAL: &str = "GOAL/1";
pub const LOCATION: &str = "location/1";
pub const MOVE: &str = "move/1";
pub const ZONE_CENTER: &str = "DECELERATION_ZONE_CENTER/2";
pub const ZONE_DECAY: &str = "DECELERATION_ZONE_DECAY/1";
pub const MIN_ACTION_BOUND: &str = "MIN_ACTION_BOUND";
pub const MAX_ACTION_BOUND: &str = "MAX_ACTION_BOUND";
pub const DISTANCE: &str = "distance/1";
pub const DECELERATION: &str = "deceleration/1";

/// A circular region that slows down anything passing near its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub center_x: f32,
    pub center_y: f32,
    pub decay: f32,
}

impl Zone {
    #[must_use]
    pub const fn new(center_x: f32, center_y: f32, decay: f32) -> Self {
        Self { center_x, center_y, decay }
    }

    #[must_use]
    pub fn distance(&self, x: f32, y: f32) -> f32 {
        ((x - self.center_x).powi(2) + (y - self.center_y).powi(2)).sqrt()
    }

    /// Logistic attenuation `2 / (1 + exp(-decay * d)) - 1`, in `[0, 1)` for
    /// non-negative decay.
    #[must_use]
    pub fn deceleration(&self, x: f32, y: f32) -> f32 {
        attenuation(self.decay, self.distance(x, y))
    }
}

#[must_use]
pub fn attenuation(decay: f32, distance: f32) -> f32 {
    2.0 / (1.0 + (-decay * distance).exp()) - 1.0
}

/// Rejects zones whose decay would push the field outside `[0, 1]`.
pub fn validate_zones(zones: &[Zone]) -> Result<(), ModelError> {
    for (index, zone) in zones.iter().enumerate() {
        if !zone.decay.is_finite() || zone.decay < 0.0 {
            return Err(ModelError::InvalidDecay { index, decay: zone.decay });
        }
    }
    Ok(())
}

/// Product of every zone's deceleration at `(x, y)`; `1.0` with no zones.
#[must_use]
pub fn potential(zones: &[Zone], x: f32, y: f32) -> f32 {
    zones.iter().fold(1.0, |acc, z| acc * z.deceleration(x, y))
}

/// Read-only constants for one navigation episode.
#[derive(Clone, Debug, PartialEq)]
pub struct NonFluents {
    pub goal: [f32; 2],
    pub start: [f32; 2],
    pub zones: Vec<Zone>,
}

impl NonFluents {
    /// Builds the episode constants from evaluated model fluents.
    ///
    /// # Errors
    ///
    /// Fails if a required fluent is missing, the zone centre and decay
    /// tables disagree in length, or a zone has an invalid decay.
    pub fn from_fluents(non_fluents: &Fluents, initial_state: &Fluents) -> Result<Self, ModelError> {
        let goal = non_fluents.get_sized(GOAL, 2)?;
        let start = initial_state.get_sized(LOCATION, 2)?;
        let decays = non_fluents.get(ZONE_DECAY)?.data();
        let centers = non_fluents.get_sized(ZONE_CENTER, decays.len() * 2)?;

        let zones: Vec<Zone> = centers
            .chunks_exact(2)
            .zip(decays)
            .map(|(c, &decay)| Zone::new(c[0], c[1], decay))
            .collect();
        validate_zones(&zones)?;

        Ok(Self { goal: [goal[0], goal[1]], start: [start[0], start[1]], zones })
    }

    pub fn from_model<M: Model + ?Sized>(model: &M) -> Result<Self, ModelError> {
        Self::from_fluents(&model.non_fluents(), &model.initial_state())
    }
}

#![deny(clippy::all, clippy::pedantic)]
//! JSON domain descriptions for the Navigation model.
//!
//! A domain is either a JSON file on disk or one of the built-in
//! identifiers (`Navigation-v1`, `Navigation-v2`, `Navigation-v3`).

use anyhow::{bail, Context, Result};
use model::{NavigationModel, NavigationParams, Zone};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub goal: [f32; 2],
    #[serde(default = "origin")]
    pub start: [f32; 2],
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default = "unit_bounds")]
    pub action_bounds: [f32; 2],
    #[serde(default = "default_noise")]
    pub noise_stddev: f32,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ZoneDef {
    pub center: [f32; 2],
    pub decay: f32,
}

fn origin() -> [f32; 2] {
    [0.0, 0.0]
}

fn unit_bounds() -> [f32; 2] {
    [-1.0, 1.0]
}

fn default_noise() -> f32 {
    0.01
}

pub const BUILTIN: [&str; 3] = ["Navigation-v1", "Navigation-v2", "Navigation-v3"];

impl Domain {
    /// # Errors
    ///
    /// Malformed JSON or missing required fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// The file cannot be read or does not hold a valid domain.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read domain file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse domain file {}", path.display()))
    }

    /// One of the bundled Navigation domains, or `None` for unknown ids.
    #[must_use]
    pub fn builtin(id: &str) -> Option<Self> {
        let zones = match id {
            "Navigation-v1" => vec![ZoneDef::new(5.0, 4.5, 1.15)],
            "Navigation-v2" => vec![ZoneDef::new(3.5, 2.5, 2.0), ZoneDef::new(6.5, 7.0, 1.6)],
            "Navigation-v3" => {
                vec![ZoneDef::new(2.5, 6.0, 1.8), ZoneDef::new(5.0, 4.5, 1.15), ZoneDef::new(7.5, 3.0, 2.2)]
            }
            _ => return None,
        };
        Some(Self {
            name: id.to_string(),
            goal: [8.0, 9.0],
            start: origin(),
            zones,
            action_bounds: unit_bounds(),
            noise_stddev: default_noise(),
            seed: None,
        })
    }

    /// Resolves `rddl` as a file path first, then as a built-in id.
    ///
    /// # Errors
    ///
    /// Unknown ids and unreadable or malformed files.
    pub fn load(rddl: &str) -> Result<Self> {
        let path = Path::new(rddl);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading domain file");
            return Self::from_file(path);
        }
        match Self::builtin(rddl) {
            Some(domain) => Ok(domain),
            None => bail!("unknown domain `{rddl}`: not a file and not one of {BUILTIN:?}"),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// # Errors
    ///
    /// Zone decay, action bounds or noise the model rejects.
    pub fn into_model(self) -> Result<NavigationModel> {
        let name = self.name.clone();
        let params = NavigationParams {
            name: self.name,
            goal: self.goal,
            start: self.start,
            zones: self.zones.iter().copied().map(ZoneDef::to_zone).collect(),
            action_bounds: (self.action_bounds[0], self.action_bounds[1]),
            noise_stddev: self.noise_stddev,
            seed: self.seed,
        };
        NavigationModel::new(params).with_context(|| format!("invalid domain `{name}`"))
    }
}

impl ZoneDef {
    #[must_use]
    pub fn new(x: f32, y: f32, decay: f32) -> Self {
        Self { center: [x, y], decay }
    }

    fn to_zone(self) -> Zone {
        Zone::new(self.center[0], self.center[1], self.decay)
    }
}

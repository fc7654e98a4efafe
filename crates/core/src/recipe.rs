//! Reproducible description of one generation.
//!
//! A [`Recipe`] captures everything needed to regenerate a particle cloud:
//! shape name, grid resolution, shape/control parameters, and the noise seed.
//! It is the on-disk configuration format of the CLI (`--recipe file.json`).

use crate::error::SurfaceError;
use crate::grid::check_resolution;
use serde::{Deserialize, Serialize};

/// Reproducible specification for a rose, heart, or other registered shape.
///
/// Two identical recipes fed to the same binary produce bit-identical
/// geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub shape: String,
    /// Samples along the first surface parameter (radial / `u`).
    pub rows: usize,
    /// Samples along the second surface parameter (angular / `v`).
    pub cols: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub chaos: f64,
    #[serde(default)]
    pub noise_seed: u64,
    #[serde(default = "default_noise_bound")]
    pub noise_bound: f64,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_noise_bound() -> f64 {
    DEFAULT_NOISE_BOUND
}

/// Noise half-width used when a recipe does not name one.
pub const DEFAULT_NOISE_BOUND: f64 = 1.0;

impl Recipe {
    /// Creates an ordered (chaos 0) recipe with empty params.
    pub fn new(shape: &str, rows: usize, cols: usize) -> Self {
        Self {
            shape: shape.to_string(),
            rows,
            cols,
            params: empty_params(),
            chaos: 0.0,
            noise_seed: 0,
            noise_bound: DEFAULT_NOISE_BOUND,
        }
    }

    /// Validates the resolution. Control values are checked by the
    /// generators themselves when the recipe is run.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        check_resolution(self.rows, self.cols).map(|_| ())
    }

    /// Parses a recipe from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SurfaceError> {
        let recipe: Recipe =
            serde_json::from_str(text).map_err(|e| SurfaceError::InvalidRecipe(e.to_string()))?;
        recipe.validate()?;
        Ok(recipe)
    }
}

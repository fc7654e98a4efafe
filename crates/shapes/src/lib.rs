#![deny(unsafe_code)]
//! Shape registry: maps shape-mode names to surfaces and runs recipes.
//!
//! This crate sits between `rosebud-core` (which defines the `Surface` trait)
//! and the individual shape crates (`rosebud-rose`, `rosebud-heart`). The CLI
//! depends on it so shape dispatch lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec3;
use rosebud_core::params::{CHAOS, NOISE_BOUND};
use rosebud_core::surface::sample_grid;
use rosebud_core::{generate_chaos_cloud, ParticleSet, Recipe, Surface, SurfaceError, SurfaceGrid};
use rosebud_heart::HeartSurface;
use rosebud_rose::RoseSurface;
use serde_json::Value;

/// All available shape names.
const SHAPE_NAMES: &[&str] = &["rose", "heart"];

/// Enumeration of the registered parametric shapes.
///
/// The shape mode picks a branch; the rose parameters are never reused to
/// draw the heart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rose(RoseSurface),
    Heart(HeartSurface),
}

impl ShapeKind {
    /// Constructs a shape by name from a JSON params object.
    ///
    /// Returns `SurfaceError::UnknownShape` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, SurfaceError> {
        match name {
            "rose" => Ok(ShapeKind::Rose(RoseSurface::from_json(params)?)),
            "heart" => Ok(ShapeKind::Heart(HeartSurface::from_json(params)?)),
            _ => Err(SurfaceError::UnknownShape(name.to_string())),
        }
    }

    /// Returns a slice of all recognized shape names.
    pub fn list_shapes() -> &'static [&'static str] {
        SHAPE_NAMES
    }

    /// Reference `(rows, cols)` for a shape name.
    pub fn default_resolution(name: &str) -> Result<(usize, usize), SurfaceError> {
        match name {
            "rose" => Ok((
                rosebud_rose::DEFAULT_RADIAL_SAMPLES,
                rosebud_rose::DEFAULT_ANGULAR_SAMPLES,
            )),
            "heart" => Ok((
                rosebud_heart::DEFAULT_U_SAMPLES,
                rosebud_heart::DEFAULT_V_SAMPLES,
            )),
            _ => Err(SurfaceError::UnknownShape(name.to_string())),
        }
    }

    /// Samples this shape on a `rows x cols` grid.
    pub fn grid(&self, rows: usize, cols: usize) -> Result<SurfaceGrid, SurfaceError> {
        sample_grid(self, rows, cols)
    }
}

impl Surface for ShapeKind {
    fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rose(s) => s.name(),
            ShapeKind::Heart(s) => s.name(),
        }
    }

    fn point(&self, s: f64, t: f64) -> DVec3 {
        match self {
            ShapeKind::Rose(r) => r.point(s, t),
            ShapeKind::Heart(h) => h.point(s, t),
        }
    }

    fn params(&self) -> Value {
        match self {
            ShapeKind::Rose(s) => s.params(),
            ShapeKind::Heart(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            ShapeKind::Rose(s) => s.param_schema(),
            ShapeKind::Heart(s) => s.param_schema(),
        }
    }
}

/// Runs a recipe: builds the shape, samples its grid, and scatters it into a
/// particle cloud.
///
/// Every control (resolution, shape params, chaos, noise bound) is validated
/// before any point is evaluated.
pub fn generate(recipe: &Recipe) -> Result<ParticleSet, SurfaceError> {
    recipe.validate()?;
    let shape = ShapeKind::from_name(&recipe.shape, &recipe.params)?;
    CHAOS.check(recipe.chaos)?;
    NOISE_BOUND.check(recipe.noise_bound)?;

    tracing::debug!(
        shape = recipe.shape.as_str(),
        rows = recipe.rows,
        cols = recipe.cols,
        "running recipe"
    );
    let grid = shape.grid(recipe.rows, recipe.cols)?;
    generate_chaos_cloud(&grid, recipe.chaos, recipe.noise_seed, recipe.noise_bound)
}

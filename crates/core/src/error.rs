//! Error types for the rosebud core.

use thiserror::Error;

/// Errors produced by surface generation, chaos clouds, and color mapping.
///
/// Every variant is a precondition violation detected before any geometry
/// is computed, except [`SurfaceError::Io`] which only the snapshot writer
/// produces.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// A control scalar was outside its documented domain (or not finite).
    #[error("parameter '{name}' = {value} is out of range: expected {expected}")]
    InvalidParameterRange {
        name: String,
        value: f64,
        expected: String,
    },

    /// A grid was requested with fewer than two samples along an axis.
    #[error("degenerate resolution {rows}x{cols}: both axes need at least 2 samples")]
    DegenerateResolution { rows: usize, cols: usize },

    /// A color category was not registered in the mapper.
    #[error("unknown color category: {0}")]
    UnknownCategory(String),

    /// A shape name was not recognized by the registry.
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A point buffer did not match the requested grid dimensions.
    #[error("dimension mismatch: expected {expected} points, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A color spec violated its stop ordering or coverage rules.
    #[error("invalid color spec: {0}")]
    InvalidColorSpec(String),

    /// A recipe could not be parsed.
    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Writing an output file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

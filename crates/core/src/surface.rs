//! The `Surface` trait that every parametric shape implements.
//!
//! The trait is object-safe so shapes can be selected at runtime as
//! `&dyn Surface` by a shape-mode flag.

use crate::error::SurfaceError;
use crate::grid::{check_resolution, SurfaceGrid};
use glam::DVec3;
use serde_json::Value;

/// A closed-form parametric surface over the unit square.
///
/// Implementations map normalized parameters `(s, t)` in `[0, 1]^2` onto
/// their own domains (radial/angular for the rose, `u`/`v` for the heart).
/// `point` must be a pure function of its arguments and `self`.
pub trait Surface {
    /// Registry name of the shape, e.g. `"rose"`.
    fn name(&self) -> &'static str;

    /// Evaluates the surface at normalized parameters `(s, t)`.
    fn point(&self, s: f64, t: f64) -> DVec3;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

/// Normalized position of sample `index` out of `count` evenly spaced
/// samples covering `[0, 1]` inclusive.
pub fn sample_position(index: usize, count: usize) -> f64 {
    index as f64 / (count - 1) as f64
}

/// Samples `surface` on a `rows x cols` grid, endpoints included.
///
/// Returns `SurfaceError::DegenerateResolution` before evaluating anything if
/// either axis has fewer than two samples.
pub fn sample_grid(
    surface: &dyn Surface,
    rows: usize,
    cols: usize,
) -> Result<SurfaceGrid, SurfaceError> {
    check_resolution(rows, cols)?;
    tracing::debug!(shape = surface.name(), rows, cols, "sampling surface grid");
    SurfaceGrid::from_fn(rows, cols, |i, j| {
        surface.point(sample_position(i, rows), sample_position(j, cols))
    })
}

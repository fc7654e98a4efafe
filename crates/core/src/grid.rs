//! Rectangular grid of 3D surface samples.
//!
//! A `SurfaceGrid` stores `rows * cols` points in row-major order. Row `i` is
//! the first surface parameter (radial for the rose, `u` for the heart) and
//! column `j` the second (angular, `v`). Access outside the grid returns
//! `None`; nothing wraps around.

use crate::error::SurfaceError;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Smallest sample count per axis that still spans a surface.
pub const MIN_SAMPLES: usize = 2;

/// A rectangular, fully populated grid of surface points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct SurfaceGrid {
    rows: usize,
    cols: usize,
    points: Vec<DVec3>,
}

/// Unvalidated wire form, checked through [`SurfaceGrid::from_points`].
#[derive(Deserialize)]
struct GridParts {
    rows: usize,
    cols: usize,
    points: Vec<DVec3>,
}

impl TryFrom<GridParts> for SurfaceGrid {
    type Error = SurfaceError;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        Self::from_points(parts.rows, parts.cols, parts.points)
    }
}

/// Rejects resolutions that would collapse the surface to a line or point.
pub fn check_resolution(rows: usize, cols: usize) -> Result<usize, SurfaceError> {
    if rows < MIN_SAMPLES || cols < MIN_SAMPLES {
        return Err(SurfaceError::DegenerateResolution { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(SurfaceError::DegenerateResolution { rows, cols })
}

impl SurfaceGrid {
    /// Builds a grid by evaluating `f(i, j)` for every cell in row-major order.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, SurfaceError>
    where
        F: FnMut(usize, usize) -> DVec3,
    {
        let len = check_resolution(rows, cols)?;
        let mut points = Vec::with_capacity(len);
        for i in 0..rows {
            for j in 0..cols {
                points.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, points })
    }

    /// Wraps a pre-built point buffer, validating `points.len() == rows * cols`.
    pub fn from_points(rows: usize, cols: usize, points: Vec<DVec3>) -> Result<Self, SurfaceError> {
        let expected = check_resolution(rows, cols)?;
        if points.len() != expected {
            return Err(SurfaceError::DimensionMismatch {
                expected,
                got: points.len(),
            });
        }
        Ok(Self { rows, cols, points })
    }

    /// Number of samples along the first parameter.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of samples along the second parameter.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid grid has at least `2 x 2` points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The flattened row-major point buffer.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The point at `(i, j)`, or `None` outside the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<DVec3> {
        if i < self.rows && j < self.cols {
            Some(self.points[i * self.cols + j])
        } else {
            None
        }
    }

    /// One row of the grid (all second-parameter samples for a fixed `i`).
    pub fn row(&self, i: usize) -> Option<&[DVec3]> {
        (i < self.rows).then(|| &self.points[i * self.cols..(i + 1) * self.cols])
    }

    /// Returns true if every coordinate of every point is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Axis-aligned bounds `(min, max)` of all points.
    pub fn bounds(&self) -> (DVec3, DVec3) {
        self.points.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        )
    }
}

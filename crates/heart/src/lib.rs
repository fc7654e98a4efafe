#![deny(unsafe_code)]
//! Parametric heart surface.
//!
//! The classic heart curve `(16 sin^3 u, 13 cos u - 5 cos 2u - 2 cos 3u - cos 4u)`
//! is revolved through `v` in `[0, pi]`: `sin v` scales the profile and
//! `cos v` sweeps the depth axis. The result is normalized by 1/16 so the
//! heart has roughly unit half-width, comparable to the rose.
//!
//! ```text
//! X = sin v * 16 sin^3 u                                  / 16
//! Y = depth * cos v                                       / 16
//! Z = sin v * (13 cos u - 5 cos 2u - 2 cos 3u - cos 4u)   / 16
//! ```

use glam::DVec3;
use rosebud_core::params::{param_f64, Control, Lower};
use rosebud_core::surface::{sample_grid, Surface};
use rosebud_core::{SurfaceError, SurfaceGrid};
use serde_json::{json, Value};
use std::f64::consts::{PI, TAU};

/// Depth of the revolved heart, in curve units (before the 1/16 normalization).
pub const DEFAULT_DEPTH: f64 = 6.0;

/// Samples of `u` around the heart outline.
pub const DEFAULT_U_SAMPLES: usize = 121;
/// Samples of `v` from the back pole to the front pole.
pub const DEFAULT_V_SAMPLES: usize = 61;

const SCALE: f64 = 1.0 / 16.0;

const DEPTH: Control = Control {
    name: "depth",
    lower: Lower::Inclusive(0.0),
    upper: f64::INFINITY,
};

/// Heart surface over `u` in `[0, 2 pi]` and `v` in `[0, pi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartSurface {
    depth: f64,
}

impl Default for HeartSurface {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl HeartSurface {
    pub fn new(depth: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            depth: DEPTH.check(depth)?,
        })
    }

    /// Builds a heart from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, SurfaceError> {
        Self::new(param_f64(params, "depth", DEFAULT_DEPTH)?)
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Evaluates the heart at `u` in `[0, 2 pi]` and `v` in `[0, pi]`.
    pub fn evaluate(&self, u: f64, v: f64) -> DVec3 {
        let (sin_v, cos_v) = v.sin_cos();
        let width = 16.0 * u.sin().powi(3);
        let height =
            13.0 * u.cos() - 5.0 * (2.0 * u).cos() - 2.0 * (3.0 * u).cos() - (4.0 * u).cos();
        DVec3::new(
            sin_v * width * SCALE,
            self.depth * cos_v * SCALE,
            sin_v * height * SCALE,
        )
    }
}

impl Surface for HeartSurface {
    fn name(&self) -> &'static str {
        "heart"
    }

    fn point(&self, s: f64, t: f64) -> DVec3 {
        self.evaluate(s * TAU, t * PI)
    }

    fn params(&self) -> Value {
        json!({ "depth": self.depth })
    }

    fn param_schema(&self) -> Value {
        json!({
            "depth": {
                "type": "number",
                "default": DEFAULT_DEPTH,
                "min": 0.0,
                "description": "Front-to-back thickness of the heart"
            }
        })
    }
}

/// Generates the heart surface grid with `resolution_u` samples of `u` (rows)
/// and `resolution_v` samples of `v` (columns), endpoints included.
pub fn generate_heart_surface(
    resolution_u: usize,
    resolution_v: usize,
) -> Result<SurfaceGrid, SurfaceError> {
    tracing::debug!("generating heart surface");
    sample_grid(&HeartSurface::default(), resolution_u, resolution_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_requested_size_and_is_finite() {
        let grid = generate_heart_surface(64, 32).unwrap();
        assert_eq!(grid.rows(), 64);
        assert_eq!(grid.cols(), 32);
        assert!(grid.is_finite());
    }

    #[test]
    fn rejects_degenerate_resolution() {
        assert_eq!(
            generate_heart_surface(1, 32),
            Err(SurfaceError::DegenerateResolution { rows: 1, cols: 32 })
        );
        assert_eq!(
            generate_heart_surface(32, 0),
            Err(SurfaceError::DegenerateResolution { rows: 32, cols: 0 })
        );
    }

    #[test]
    fn is_mirror_symmetric_in_x() {
        let heart = HeartSurface::default();
        for i in 1..20 {
            let u = i as f64 * 0.15;
            let v = 1.1;
            let a = heart.evaluate(u, v);
            let b = heart.evaluate(TAU - u, v);
            assert!((a.x + b.x).abs() < 1e-12, "x not mirrored at u={u}");
            assert!((a.y - b.y).abs() < 1e-12);
            assert!((a.z - b.z).abs() < 1e-12);
        }
    }

    #[test]
    fn top_lobe_dip_and_bottom_tip() {
        let heart = HeartSurface::default();
        let v = PI / 2.0;
        // u = 0: dip between the lobes, Z = (13 - 5 - 2 - 1) / 16.
        let dip = heart.evaluate(0.0, v);
        assert!((dip.z - 5.0 / 16.0).abs() < 1e-12);
        assert!(dip.x.abs() < 1e-12);
        // u = pi: bottom tip, Z = (-13 - 5 + 2 - 1) / 16.
        let tip = heart.evaluate(PI, v);
        assert!((tip.z - (-17.0 / 16.0)).abs() < 1e-12);
    }

    #[test]
    fn poles_collapse_to_depth_axis() {
        let heart = HeartSurface::default();
        for v in [0.0, PI] {
            let p = heart.evaluate(1.3, v);
            assert!(p.x.abs() < 1e-12 && p.z.abs() < 1e-12);
            assert!((p.y.abs() - DEFAULT_DEPTH / 16.0).abs() < 1e-12);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_heart_surface(10, 10).unwrap();
        let b = generate_heart_surface(10, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_json_reads_depth_and_rejects_negative() {
        assert_eq!(HeartSurface::from_json(&json!({})).unwrap().depth(), DEFAULT_DEPTH);
        assert_eq!(
            HeartSurface::from_json(&json!({"depth": 2.0})).unwrap().depth(),
            2.0
        );
        assert!(HeartSurface::from_json(&json!({"depth": -1.0})).is_err());
    }

    #[test]
    fn params_and_schema_agree() {
        let heart = HeartSurface::default();
        assert!(heart.params().get("depth").is_some());
        assert!(heart.param_schema().get("depth").is_some());
        assert_eq!(heart.name(), "heart");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn points_stay_within_curve_bounds(u in 0.0_f64..=TAU, v in 0.0_f64..=PI) {
                let p = HeartSurface::default().evaluate(u, v);
                prop_assert!(p.x.abs() <= 1.0 + 1e-12);
                prop_assert!(p.y.abs() <= DEFAULT_DEPTH / 16.0 + 1e-12);
                prop_assert!(p.z.abs() <= 21.0 / 16.0 + 1e-12);
            }
        }
    }
}

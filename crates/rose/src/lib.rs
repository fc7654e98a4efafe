#![deny(unsafe_code)]
//! Spiral parametric rose surface.
//!
//! The rose is a single sheet swept along a long angular spiral. For radial
//! sample `x` in `[0, 1]` and angle `t`:
//!
//! ```text
//! p(t) = (pi/2) * exp(-t / (8 pi))                 spiral decay
//! u(t) = 1 - (1 - (k t mod 2 pi) / pi)^4 / 2       petal lobing
//! y    = 2 (x^2 - x)^2 sin p
//! r    = u (x sin p + y cos p) * radial_scale
//! Z    = u (x cos p - y sin p) * height_stretch
//! X, Y = r cos t, r sin t
//! ```
//!
//! Sweeping `t` over many turns (17 pi by default) layers the petals on top of
//! each other while `p` closes them toward the center. The petal frequency `k`
//! is caller-supplied; 3.6 and 3.3 both give a natural-looking rose.

pub mod bloom;

pub use bloom::{BloomMorph, BloomStage};

use glam::DVec3;
use rosebud_core::params::{param_f64, ANGULAR_SPAN, PETAL_FREQUENCY};
use rosebud_core::surface::{sample_grid, Surface};
use rosebud_core::{SurfaceError, SurfaceGrid};
use serde_json::{json, Value};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Petal frequency used by the reference rose.
pub const DEFAULT_PETAL_FREQUENCY: f64 = 3.6;
/// Alternate petal frequency with slightly wider petal overlap.
pub const ALT_PETAL_FREQUENCY: f64 = 3.3;
/// Angular sweep of the spiral.
pub const DEFAULT_ANGULAR_SPAN: f64 = 17.0 * PI;
/// Starting angle of the spiral.
pub const DEFAULT_ANGULAR_OFFSET: f64 = -2.0 * PI;
/// Radial samples of the reference rose.
pub const DEFAULT_RADIAL_SAMPLES: usize = 25;
/// Angular samples of the reference rose.
pub const DEFAULT_ANGULAR_SAMPLES: usize = 1151;

/// Validated rose parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoseSurface {
    petal_frequency: f64,
    angular_span: f64,
    angular_offset: f64,
    morph: BloomMorph,
}

impl Default for RoseSurface {
    /// The fully open reference rose.
    fn default() -> Self {
        Self {
            petal_frequency: DEFAULT_PETAL_FREQUENCY,
            angular_span: DEFAULT_ANGULAR_SPAN,
            angular_offset: DEFAULT_ANGULAR_OFFSET,
            morph: BloomMorph::open(),
        }
    }
}

impl RoseSurface {
    /// Creates a rose with the default spiral sweep.
    pub fn new(petal_frequency: f64, bloom: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            petal_frequency: PETAL_FREQUENCY.check(petal_frequency)?,
            angular_span: DEFAULT_ANGULAR_SPAN,
            angular_offset: DEFAULT_ANGULAR_OFFSET,
            morph: BloomMorph::new(bloom)?,
        })
    }

    /// Replaces the spiral sweep. `span` must be positive and `offset` finite.
    pub fn with_sweep(self, span: f64, offset: f64) -> Result<Self, SurfaceError> {
        let angular_span = ANGULAR_SPAN.check(span)?;
        if !offset.is_finite() {
            return Err(SurfaceError::InvalidParameterRange {
                name: "angular_offset".into(),
                value: offset,
                expected: "finite".into(),
            });
        }
        Ok(Self {
            angular_span,
            angular_offset: offset,
            ..self
        })
    }

    /// Builds a rose from a JSON params object, falling back to defaults for
    /// missing keys and rejecting wrong types or out-of-range values.
    pub fn from_json(params: &Value) -> Result<Self, SurfaceError> {
        let base = Self::default();
        let k = param_f64(params, "petal_frequency", base.petal_frequency)?;
        let bloom = param_f64(params, "bloom", base.morph.bloom())?;
        let span = param_f64(params, "angular_span", base.angular_span)?;
        let offset = param_f64(params, "angular_offset", base.angular_offset)?;
        Self::new(k, bloom)?.with_sweep(span, offset)
    }

    pub fn petal_frequency(&self) -> f64 {
        self.petal_frequency
    }

    pub fn morph(&self) -> BloomMorph {
        self.morph
    }

    /// Spiral angle for normalized angular position `t_norm`.
    pub fn angle(&self, t_norm: f64) -> f64 {
        self.angular_offset + self.angular_span * t_norm
    }

    /// Evaluates the rose at radial sample `x` and spiral angle `t`.
    pub fn evaluate(&self, x: f64, t: f64) -> DVec3 {
        let p = FRAC_PI_2 * (-t / (8.0 * PI)).exp();
        let u = lobing(self.petal_frequency, t);
        let (sin_p, cos_p) = p.sin_cos();
        let y = 2.0 * (x * x - x).powi(2) * sin_p;
        let r = u * (x * sin_p + y * cos_p) * self.morph.radial_scale();
        let h = u * (x * cos_p - y * sin_p) * self.morph.height_stretch();
        let (sin_t, cos_t) = t.sin_cos();
        DVec3::new(r * cos_t, r * sin_t, h)
    }
}

/// Petal lobing factor `u(t)`, always in `[0.5, 1]`.
///
/// The remainder is Euclidean so negative angles lobe the same way as
/// positive ones.
pub fn lobing(petal_frequency: f64, t: f64) -> f64 {
    let phase = (petal_frequency * t).rem_euclid(TAU) / PI;
    1.0 - (1.0 - phase).powi(4) / 2.0
}

impl Surface for RoseSurface {
    fn name(&self) -> &'static str {
        "rose"
    }

    fn point(&self, s: f64, t: f64) -> DVec3 {
        self.evaluate(s, self.angle(t))
    }

    fn params(&self) -> Value {
        json!({
            "petal_frequency": self.petal_frequency,
            "bloom": self.morph.bloom(),
            "angular_span": self.angular_span,
            "angular_offset": self.angular_offset,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "petal_frequency": {
                "type": "number",
                "default": DEFAULT_PETAL_FREQUENCY,
                "min_exclusive": 0.0,
                "description": "Petal lobing frequency k; 3.6 and 3.3 are the reference values"
            },
            "bloom": {
                "type": "number",
                "default": 1.0,
                "min": 0.0,
                "max": 1.0,
                "description": "Bud (0) to fully open flower (1)"
            },
            "angular_span": {
                "type": "number",
                "default": DEFAULT_ANGULAR_SPAN,
                "min_exclusive": 0.0,
                "description": "Total spiral sweep in radians"
            },
            "angular_offset": {
                "type": "number",
                "default": DEFAULT_ANGULAR_OFFSET,
                "description": "Starting spiral angle in radians"
            }
        })
    }
}

/// Generates the rose surface grid.
///
/// Rows are radial samples (`x` from 0 to 1), columns are angular samples
/// along the default spiral. Rejects resolutions below 2, non-positive
/// `petal_frequency`, and `bloom` outside `[0, 1]` before computing anything.
pub fn generate_rose_surface(
    resolution_radial: usize,
    resolution_angular: usize,
    petal_frequency: f64,
    bloom: f64,
) -> Result<SurfaceGrid, SurfaceError> {
    let rose = RoseSurface::new(petal_frequency, bloom)?;
    tracing::debug!(petal_frequency, bloom, "generating rose surface");
    sample_grid(&rose, resolution_radial, resolution_angular)
}

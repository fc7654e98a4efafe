//! Bud-to-bloom morph coefficients and stage banding.
//!
//! `bloom` in `[0, 1]` maps to two shape multipliers consumed by the rose:
//!
//! ```text
//! radial_scale   = 0.2 + 0.8 * bloom    (0.2 at bud, 1.0 open)
//! height_stretch = 1.5 - 0.5 * bloom    (1.5 at bud, 1.0 open)
//! ```
//!
//! Both are affine in `bloom`, so any small change in bloom moves the surface
//! by a proportionally small amount.

use rosebud_core::params::BLOOM;
use rosebud_core::SurfaceError;

/// Lower edge of the [`BloomStage::Mid`] band.
pub const MID_THRESHOLD: f64 = 0.3;
/// Lower edge of the [`BloomStage::Full`] band.
pub const FULL_THRESHOLD: f64 = 0.7;

/// Validated bloom value with its derived shape coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomMorph {
    bloom: f64,
}

impl BloomMorph {
    /// Returns `SurfaceError::InvalidParameterRange` if `bloom` is outside `[0, 1]`.
    pub fn new(bloom: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            bloom: BLOOM.check(bloom)?,
        })
    }

    /// The fully open flower (`bloom = 1`), which leaves the surface unscaled.
    pub fn open() -> Self {
        Self { bloom: 1.0 }
    }

    pub fn bloom(&self) -> f64 {
        self.bloom
    }

    /// Multiplier on the local radius `r`.
    pub fn radial_scale(&self) -> f64 {
        0.2 + 0.8 * self.bloom
    }

    /// Multiplier on the final height `Z`.
    pub fn height_stretch(&self) -> f64 {
        1.5 - 0.5 * self.bloom
    }

    pub fn stage(&self) -> BloomStage {
        BloomStage::of(self.bloom)
    }
}

/// Coarse band of a bloom value, for captions and celebration triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BloomStage {
    /// `bloom < 0.3`
    Early,
    /// `0.3 <= bloom < 0.7`
    Mid,
    /// `bloom >= 0.7`
    Full,
}

impl BloomStage {
    /// Bands a validated bloom value.
    pub fn classify(bloom: f64) -> Result<Self, SurfaceError> {
        BLOOM.check(bloom).map(Self::of)
    }

    fn of(bloom: f64) -> Self {
        if bloom < MID_THRESHOLD {
            BloomStage::Early
        } else if bloom < FULL_THRESHOLD {
            BloomStage::Mid
        } else {
            BloomStage::Full
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BloomStage::Early => "early",
            BloomStage::Mid => "mid",
            BloomStage::Full => "full",
        }
    }

    /// True when moving from `previous` to `current` enters the full bloom.
    ///
    /// The caller keeps `previous`; `None` means no stage was shown before.
    pub fn should_celebrate(previous: Option<BloomStage>, current: BloomStage) -> bool {
        current == BloomStage::Full && previous != Some(BloomStage::Full)
    }
}

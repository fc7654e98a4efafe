//! Chaos-to-order particle clouds.
//!
//! A reference [`SurfaceGrid`] is flattened to `N` particles. Each particle
//! gets a noise vector drawn uniformly from `[-B, B)^3` by a generator keyed
//! on `(noise_seed, index)`, and is displaced by `noise * chaos`. At
//! `chaos = 0` the cloud is the surface itself; at `chaos = 1` every
//! particle sits somewhere in the box of half-width `B` around its reference
//! point.
//!
//! The color scalar is taken from the undisplaced point's distance to the
//! Z axis, so the coloring shows the final structure while the particles are
//! still scattered.

use crate::error::SurfaceError;
use crate::grid::SurfaceGrid;
use crate::params::{CHAOS, NOISE_BOUND};
use crate::prng::Xorshift64;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// One point of a chaos cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Undisplaced surface position.
    pub reference: DVec3,
    /// Full-strength noise vector in `[-B, B)^3`.
    pub displacement: DVec3,
    /// `reference + displacement * chaos`.
    pub position: DVec3,
    /// Normalized distance of `reference` from the Z axis, in `[0, 1]`.
    pub color: f64,
}

/// A flattened, displaced particle cloud derived from a surface grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSet {
    chaos: f64,
    particles: Vec<Particle>,
}

impl ParticleSet {
    /// The chaos value the set was generated with.
    pub fn chaos(&self) -> f64 {
        self.chaos
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Displaced positions in grid order.
    pub fn positions(&self) -> Vec<DVec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Per-particle color scalars in grid order.
    pub fn color_scalars(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.color).collect()
    }
}

/// The noise vector for particle `index`, uniform in `[-bound, bound)^3`.
///
/// Pure in `(seed, index, bound)`: the generator is rebuilt for every call.
pub fn point_noise(seed: u64, index: usize, bound: f64) -> DVec3 {
    let mut rng = Xorshift64::keyed(seed, index as u64);
    DVec3::new(
        rng.next_symmetric(bound),
        rng.next_symmetric(bound),
        rng.next_symmetric(bound),
    )
}

/// Interpolates between `reference` and scattered noise.
///
/// Returns `SurfaceError::InvalidParameterRange` if `chaos` is outside
/// `[0, 1]` or `noise_bound` is negative or not finite.
pub fn generate_chaos_cloud(
    reference: &SurfaceGrid,
    chaos: f64,
    noise_seed: u64,
    noise_bound: f64,
) -> Result<ParticleSet, SurfaceError> {
    let chaos = CHAOS.check(chaos)?;
    let bound = NOISE_BOUND.check(noise_bound)?;
    tracing::debug!(
        points = reference.len(),
        chaos,
        noise_seed,
        noise_bound = bound,
        "generating chaos cloud"
    );

    let axis_distance = |p: &DVec3| DVec2::new(p.x, p.y).length();
    let max_distance = reference
        .points()
        .iter()
        .map(axis_distance)
        .fold(0.0_f64, f64::max);

    let particles = reference
        .points()
        .iter()
        .enumerate()
        .map(|(index, &point)| {
            let displacement = point_noise(noise_seed, index, bound);
            let color = if max_distance > 0.0 {
                axis_distance(&point) / max_distance
            } else {
                0.0
            };
            Particle {
                reference: point,
                displacement,
                position: point + displacement * chaos,
                color,
            }
        })
        .collect();

    Ok(ParticleSet { chaos, particles })
}

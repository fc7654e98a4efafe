//! Pure-computation splatting of a [`ParticleSet`] into an RGBA8 buffer.
//!
//! This module is always available (no feature gate) so the `png` snapshot
//! path and any other frontend share the same projection.
//!
//! Particles are rotated by `yaw` about the Z axis, then tilted by `pitch`
//! about the X axis, and projected orthographically with Z up. The cloud is
//! fitted to the frame with a margin. A depth buffer keeps the nearest
//! particle per pixel.

use glam::{DMat3, DVec3};
use rosebud_core::{ColorSpec, ParticleSet, SurfaceError};

/// Frame background, `#0e1117`.
pub const BACKGROUND: [u8; 3] = [0x0e, 0x11, 0x17];

/// Frame size and camera for [`splat_to_rgba`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub width: usize,
    pub height: usize,
    /// Rotation about the Z axis, radians.
    pub yaw: f64,
    /// Tilt of the top toward the viewer, radians.
    pub pitch: f64,
    /// Side of the square splat, in pixels.
    pub point_size: usize,
    /// Fraction of the frame left empty on each side.
    pub margin: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            yaw: 0.0,
            pitch: 0.6,
            point_size: 1,
            margin: 0.05,
        }
    }
}

impl View {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), SurfaceError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(SurfaceError::InvalidParameterRange {
                    name: name.into(),
                    value: 0.0,
                    expected: ">= 1".into(),
                });
            }
        }
        if self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .is_none()
        {
            return Err(SurfaceError::InvalidParameterRange {
                name: "frame".into(),
                value: self.width as f64 * self.height as f64,
                expected: "width * height * 4 <= usize::MAX".into(),
            });
        }
        if !(0.0..0.5).contains(&self.margin) {
            return Err(SurfaceError::InvalidParameterRange {
                name: "margin".into(),
                value: self.margin,
                expected: "[0, 0.5)".into(),
            });
        }
        if !self.yaw.is_finite() || !self.pitch.is_finite() {
            return Err(SurfaceError::InvalidParameterRange {
                name: "view angle".into(),
                value: if self.yaw.is_finite() { self.pitch } else { self.yaw },
                expected: "finite".into(),
            });
        }
        Ok(())
    }

    /// Camera-space point: `x` right, `y` depth (smaller is nearer), `z` up.
    fn camera(&self, p: DVec3) -> DVec3 {
        DMat3::from_rotation_x(self.pitch) * DMat3::from_rotation_z(self.yaw) * p
    }
}

/// Projects `set` through `view`, coloring each particle by sampling `spec`
/// with its color scalar. Returns `width * height * 4` bytes, row-major from
/// the top-left, alpha always 255.
pub fn splat_to_rgba(
    set: &ParticleSet,
    spec: &ColorSpec,
    view: &View,
) -> Result<Vec<u8>, SurfaceError> {
    view.validate()?;
    let (w, h) = (view.width, view.height);
    let mut rgba: Vec<u8> = std::iter::repeat([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255])
        .take(w * h)
        .flatten()
        .collect();
    if set.is_empty() {
        return Ok(rgba);
    }

    let projected: Vec<DVec3> = set.particles().iter().map(|p| view.camera(p.position)).collect();
    let (lo, hi) = projected.iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    );
    let center_x = (lo.x + hi.x) / 2.0;
    let center_z = (lo.z + hi.z) / 2.0;
    let span_x = (hi.x - lo.x).max(f64::EPSILON);
    let span_z = (hi.z - lo.z).max(f64::EPSILON);
    let fill = 1.0 - 2.0 * view.margin;
    let scale = fill * (w as f64 / span_x).min(h as f64 / span_z);

    let mut depth = vec![f64::INFINITY; w * h];
    let half = (view.point_size.max(1) - 1) / 2;
    for (particle, cam) in set.particles().iter().zip(&projected) {
        let px = (w as f64 / 2.0 + (cam.x - center_x) * scale).floor();
        let py = (h as f64 / 2.0 - (cam.z - center_z) * scale).floor();
        if !px.is_finite() || !py.is_finite() {
            continue;
        }
        let color = spec.sample(particle.color)?.to_rgb8();
        let size = view.point_size.max(1) as i64;
        let x0 = px as i64 - half as i64;
        let y0 = py as i64 - half as i64;
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                    continue;
                }
                let idx = y as usize * w + x as usize;
                if cam.y < depth[idx] {
                    depth[idx] = cam.y;
                    rgba[idx * 4..idx * 4 + 3].copy_from_slice(&color);
                }
            }
        }
    }
    Ok(rgba)
}

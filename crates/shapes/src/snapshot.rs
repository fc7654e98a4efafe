//! CPU-side PNG rendering of a [`ParticleSet`].
//!
//! Feature-gated behind `png` (default on) so library users that only need
//! geometry do not pull in the `image` crate. The projection itself lives in
//! [`crate::pixel`].

use rosebud_core::{ColorSpec, ParticleSet, SurfaceError};
use std::path::Path;

use crate::pixel::{splat_to_rgba, View};

/// Splats `set` through `view` and writes the frame as a PNG.
///
/// Returns `SurfaceError::InvalidParameterRange` for a bad view or frame
/// sizes that overflow `u32`, and `SurfaceError::Io` on write failure.
pub fn write_png(
    set: &ParticleSet,
    spec: &ColorSpec,
    view: &View,
    path: &Path,
) -> Result<(), SurfaceError> {
    let w = frame_dim("width", view.width)?;
    let h = frame_dim("height", view.height)?;
    let rgba = splat_to_rgba(set, spec, view)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SurfaceError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SurfaceError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = w, height = h, "wrote snapshot");
    Ok(())
}

fn frame_dim(name: &str, value: usize) -> Result<u32, SurfaceError> {
    u32::try_from(value).map_err(|_| SurfaceError::InvalidParameterRange {
        name: name.into(),
        value: value as f64,
        expected: format!("<= {}", u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use rosebud_core::{ColorMapper, Recipe};

    #[test]
    fn write_png_round_trip() {
        let set = generate(&Recipe::new("rose", 10, 200)).unwrap();
        let mapper = ColorMapper::builtin();
        let spec = mapper.gradient("Red").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rose.png");

        write_png(&set, spec, &View::new(48, 32), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 48);
        assert_eq!(img.height(), 32);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn width_beyond_u32_is_rejected_before_rendering() {
        let set = generate(&Recipe::new("heart", 8, 8)).unwrap();
        let spec = ColorSpec::evenly_spaced(&["#000000", "#ffffff"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");

        let view = View::new(u32::MAX as usize + 1, 1);
        let result = write_png(&set, &spec, &view, &path);
        assert!(matches!(
            result,
            Err(SurfaceError::InvalidParameterRange { ref name, .. }) if name == "width"
        ));
        assert!(!path.exists());
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let set = generate(&Recipe::new("heart", 8, 8)).unwrap();
        let spec = ColorSpec::evenly_spaced(&["#000000", "#ffffff"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("heart.png");

        let result = write_png(&set, &spec, &View::new(8, 8), &path);
        assert!(matches!(result, Err(SurfaceError::Io(_))));
    }
}

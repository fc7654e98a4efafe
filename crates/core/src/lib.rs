#![deny(unsafe_code)]
//! Core types for the rosebud parametric-surface generator.
//!
//! Provides the `Surface` trait and grid sampler, `SurfaceGrid`, the
//! chaos-to-order particle interpolation, `Control` ranges and JSON param
//! helpers, the keyed `Xorshift64` PRNG, `Srgb` colors, `ColorSpec` gradients
//! with the `ColorMapper` category registry, and reproducible `Recipe`s.
//!
//! Everything here is a pure function of its inputs: no global state, no
//! clocks, no I/O.

pub mod chaos;
pub mod color;
pub mod error;
pub mod grid;
pub mod palette;
pub mod params;
pub mod prng;
pub mod recipe;
pub mod surface;

pub use chaos::{generate_chaos_cloud, Particle, ParticleSet};
pub use color::Srgb;
pub use error::SurfaceError;
pub use grid::SurfaceGrid;
pub use palette::{ColorMapper, ColorQuery, ColorSpec, ColorStop, MappedColor};
pub use params::Control;
pub use prng::Xorshift64;
pub use recipe::Recipe;
pub use surface::{sample_grid, Surface};

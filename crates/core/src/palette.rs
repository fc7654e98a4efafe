//! Color gradients (`ColorSpec`) and the category registry (`ColorMapper`).
//!
//! A `ColorSpec` is an ordered list of stops covering `[0, 1]`. Sampling
//! interpolates linearly per sRGB channel between the two stops that bracket
//! the scalar, and returns a stop's color exactly when the scalar lands on it.
//!
//! A `ColorMapper` names gradients by category. Lookups are exact and
//! case-sensitive; an unregistered category is an error, never a fallback.

use crate::color::Srgb;
use crate::error::SurfaceError;
use crate::params::Control;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Domain of the scalar passed to [`ColorSpec::sample`].
const SCALAR: Control = Control::unit("scalar");

/// One gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Srgb,
}

/// A validated gradient: at least two stops, strictly increasing positions,
/// first at exactly 0 and last at exactly 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorSpec {
    stops: Vec<ColorStop>,
}

impl ColorSpec {
    /// Creates a spec from explicit stops.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, SurfaceError> {
        if stops.len() < 2 {
            return Err(SurfaceError::InvalidColorSpec(format!(
                "need at least 2 stops, got {}",
                stops.len()
            )));
        }
        let first = stops[0].position;
        let last = stops[stops.len() - 1].position;
        if first != 0.0 || last != 1.0 {
            return Err(SurfaceError::InvalidColorSpec(format!(
                "stops must cover [0, 1], got [{first}, {last}]"
            )));
        }
        if let Some(pair) = stops
            .windows(2)
            .find(|w| w[0].position.partial_cmp(&w[1].position) != Some(Ordering::Less))
        {
            return Err(SurfaceError::InvalidColorSpec(format!(
                "stop positions must strictly increase: {} then {}",
                pair[0].position, pair[1].position
            )));
        }
        Ok(Self { stops })
    }

    /// Creates a spec with hex colors evenly spaced over `[0, 1]`.
    pub fn evenly_spaced(hexes: &[&str]) -> Result<Self, SurfaceError> {
        if hexes.len() < 2 {
            return Err(SurfaceError::InvalidColorSpec(format!(
                "need at least 2 colors, got {}",
                hexes.len()
            )));
        }
        let last = (hexes.len() - 1) as f64;
        let stops = hexes
            .iter()
            .enumerate()
            .map(|(i, h)| {
                Ok(ColorStop {
                    position: i as f64 / last,
                    color: Srgb::from_hex(h)?,
                })
            })
            .collect::<Result<Vec<_>, SurfaceError>>()?;
        Self::new(stops)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color of the stop at position 0.
    pub fn first(&self) -> Srgb {
        self.stops[0].color
    }

    /// Color of the stop at position 1.
    pub fn last(&self) -> Srgb {
        self.stops[self.stops.len() - 1].color
    }

    /// Samples the gradient at `scalar` in `[0, 1]`.
    ///
    /// Returns `SurfaceError::InvalidParameterRange` for scalars outside the
    /// unit interval (including NaN); nothing is clamped.
    pub fn sample(&self, scalar: f64) -> Result<Srgb, SurfaceError> {
        let s = SCALAR.check(scalar)?;
        // Number of stops at or before `s`; at least 1 because the first stop is 0.
        let upto = self.stops.partition_point(|stop| stop.position <= s);
        let lo = self.stops[upto - 1];
        if lo.position == s || upto == self.stops.len() {
            return Ok(lo.color);
        }
        let hi = self.stops[upto];
        let frac = (s - lo.position) / (hi.position - lo.position);
        Ok(lo.color.lerp(hi.color, frac))
    }
}

impl TryFrom<Vec<ColorStop>> for ColorSpec {
    type Error = SurfaceError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<ColorSpec> for Vec<ColorStop> {
    fn from(spec: ColorSpec) -> Self {
        spec.stops
    }
}

/// Input to [`ColorMapper::map_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorQuery<'a> {
    /// Look up the whole gradient registered under a category.
    Category(&'a str),
    /// Sample a category's gradient at a scalar in `[0, 1]`.
    Scalar { category: &'a str, value: f64 },
}

/// Output of [`ColorMapper::map_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MappedColor<'a> {
    Gradient(&'a ColorSpec),
    Color(Srgb),
}

/// Registry of named gradients, kept in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMapper {
    entries: Vec<(String, ColorSpec)>,
}

/// Built-in categories: name and evenly spaced hex ramp, light to dark.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Red",
        &[
            "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
            "#67000d",
        ],
    ),
    (
        "Pink",
        &[
            "#fff7f3", "#fde0dd", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177",
            "#49006a",
        ],
    ),
    (
        "Purple",
        &[
            "#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#810f7c",
            "#4d004b",
        ],
    ),
    (
        "Blue",
        &[
            "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
            "#08306b",
        ],
    ),
    (
        "Gold",
        &["#e4ff7a", "#ffe81a", "#ffbd00", "#ffa000", "#fc7f00"],
    ),
];

impl ColorMapper {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five rose colors: Red, Pink, Purple, Blue, Gold.
    pub fn builtin() -> Self {
        let mut mapper = Self::new();
        for (name, hexes) in BUILTIN {
            let spec =
                ColorSpec::evenly_spaced(hexes).expect("built-in palette hex values are valid");
            mapper.register(name, spec);
        }
        mapper
    }

    /// Registers `spec` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, spec: ColorSpec) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = spec,
            None => self.entries.push((name.to_string(), spec)),
        }
    }

    /// Registered category names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The gradient registered under exactly `category`.
    pub fn gradient(&self, category: &str) -> Result<&ColorSpec, SurfaceError> {
        self.entries
            .iter()
            .find(|(n, _)| n == category)
            .map(|(_, spec)| spec)
            .ok_or_else(|| SurfaceError::UnknownCategory(category.to_string()))
    }

    /// Resolves a category to its gradient, or a category plus scalar to a color.
    pub fn map_color(&self, query: ColorQuery<'_>) -> Result<MappedColor<'_>, SurfaceError> {
        match query {
            ColorQuery::Category(name) => self.gradient(name).map(MappedColor::Gradient),
            ColorQuery::Scalar { category, value } => self
                .gradient(category)?
                .sample(value)
                .map(MappedColor::Color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(position: f64, hex: &str) -> ColorStop {
        ColorStop {
            position,
            color: Srgb::from_hex(hex).unwrap(),
        }
    }

    fn three_stop() -> ColorSpec {
        ColorSpec::new(vec![
            stop(0.0, "#000000"),
            stop(0.25, "#ff0000"),
            stop(1.0, "#ffffff"),
        ])
        .unwrap()
    }

    // -- Construction --

    #[test]
    fn new_rejects_single_stop() {
        assert!(ColorSpec::new(vec![stop(0.0, "#000000")]).is_err());
    }

    #[test]
    fn new_rejects_partial_coverage() {
        let result = ColorSpec::new(vec![stop(0.1, "#000000"), stop(1.0, "#ffffff")]);
        assert!(matches!(result, Err(SurfaceError::InvalidColorSpec(_))));
        let result = ColorSpec::new(vec![stop(0.0, "#000000"), stop(0.9, "#ffffff")]);
        assert!(matches!(result, Err(SurfaceError::InvalidColorSpec(_))));
    }

    #[test]
    fn new_rejects_non_increasing_stops() {
        let repeated = ColorSpec::new(vec![
            stop(0.0, "#000000"),
            stop(0.5, "#ff0000"),
            stop(0.5, "#00ff00"),
            stop(1.0, "#ffffff"),
        ]);
        assert!(repeated.is_err());
        let reversed = ColorSpec::new(vec![
            stop(0.0, "#000000"),
            stop(0.7, "#ff0000"),
            stop(0.3, "#00ff00"),
            stop(1.0, "#ffffff"),
        ]);
        assert!(reversed.is_err());
    }

    #[test]
    fn new_rejects_nan_positions() {
        let result = ColorSpec::new(vec![
            stop(0.0, "#000000"),
            stop(f64::NAN, "#ff0000"),
            stop(1.0, "#ffffff"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn evenly_spaced_places_last_stop_at_one() {
        let spec = ColorSpec::evenly_spaced(&["#000000", "#808080", "#ffffff"]).unwrap();
        let positions: Vec<f64> = spec.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn evenly_spaced_propagates_bad_hex() {
        assert!(ColorSpec::evenly_spaced(&["#000000", "#zzzzzz"]).is_err());
    }

    // -- Sampling --

    #[test]
    fn sample_endpoints_return_stop_colors_exactly() {
        let spec = three_stop();
        assert_eq!(spec.sample(0.0).unwrap(), spec.first());
        assert_eq!(spec.sample(1.0).unwrap(), spec.last());
    }

    #[test]
    fn sample_on_interior_stop_is_exact() {
        let spec = three_stop();
        assert_eq!(spec.sample(0.25).unwrap(), Srgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sample_interpolates_within_bracketing_segment() {
        let spec = three_stop();
        // Halfway between red (0.25) and white (1.0).
        let c = spec.sample(0.625).unwrap();
        assert!((c.r - 1.0).abs() < 1e-12);
        assert!((c.g - 0.5).abs() < 1e-12);
        assert!((c.b - 0.5).abs() < 1e-12);
        // Halfway between black (0.0) and red (0.25).
        let c = spec.sample(0.125).unwrap();
        assert!((c.r - 0.5).abs() < 1e-12);
        assert!(c.g.abs() < 1e-12);
    }

    #[test]
    fn sample_rejects_out_of_range_scalars() {
        let spec = three_stop();
        for s in [-0.01, 1.01, f64::NAN] {
            assert!(matches!(
                spec.sample(s),
                Err(SurfaceError::InvalidParameterRange { .. })
            ));
        }
    }

    #[test]
    fn spec_json_round_trip_and_validation() {
        let spec = three_stop();
        let json = serde_json::to_string(&spec).unwrap();
        let restored: ColorSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, restored);

        let bad = r##"[{"position":0.0,"color":"#000000"}]"##;
        assert!(serde_json::from_str::<ColorSpec>(bad).is_err());
    }

    // -- Mapper --

    #[test]
    fn builtin_has_five_rose_colors_in_order() {
        let mapper = ColorMapper::builtin();
        assert_eq!(mapper.names(), vec!["Red", "Pink", "Purple", "Blue", "Gold"]);
    }

    #[test]
    fn red_and_blue_are_distinct_gradients() {
        let mapper = ColorMapper::builtin();
        let red = mapper.map_color(ColorQuery::Category("Red")).unwrap();
        let blue = mapper.map_color(ColorQuery::Category("Blue")).unwrap();
        assert_ne!(red, blue);
    }

    #[test]
    fn unknown_category_is_an_error() {
        let mapper = ColorMapper::builtin();
        assert_eq!(
            mapper.gradient("Teal"),
            Err(SurfaceError::UnknownCategory("Teal".into()))
        );
    }

    #[test]
    fn category_lookup_is_case_sensitive() {
        let mapper = ColorMapper::builtin();
        assert!(mapper.gradient("red").is_err());
        assert!(mapper.gradient("Red ").is_err());
    }

    #[test]
    fn scalar_query_samples_category_gradient() {
        let mapper = ColorMapper::builtin();
        let mapped = mapper
            .map_color(ColorQuery::Scalar {
                category: "Blue",
                value: 1.0,
            })
            .unwrap();
        assert_eq!(mapped, MappedColor::Color(Srgb::from_hex("#08306b").unwrap()));
    }

    #[test]
    fn scalar_query_reports_unknown_category_before_range() {
        let mapper = ColorMapper::builtin();
        let result = mapper.map_color(ColorQuery::Scalar {
            category: "Teal",
            value: 5.0,
        });
        assert!(matches!(result, Err(SurfaceError::UnknownCategory(_))));
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut mapper = ColorMapper::builtin();
        let mono = ColorSpec::evenly_spaced(&["#000000", "#ffffff"]).unwrap();
        mapper.register("Red", mono.clone());
        assert_eq!(mapper.gradient("Red").unwrap(), &mono);
        assert_eq!(mapper.names().len(), 5);
    }

    #[test]
    fn empty_mapper_knows_no_categories() {
        let mapper = ColorMapper::new();
        assert!(mapper.names().is_empty());
        assert!(mapper.gradient("Red").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn builtin_samples_are_valid_srgb(t in 0.0_f64..=1.0) {
                let mapper = ColorMapper::builtin();
                for name in mapper.names() {
                    let c = mapper.gradient(name).unwrap().sample(t).unwrap();
                    for v in [c.r, c.g, c.b] {
                        prop_assert!((0.0..=1.0).contains(&v), "{name} at {t}: {v}");
                    }
                }
            }

            #[test]
            fn sample_is_continuous(t in 0.0_f64..0.999) {
                let spec = ColorMapper::builtin().gradient("Red").unwrap().clone();
                let a = spec.sample(t).unwrap();
                let b = spec.sample(t + 0.001).unwrap();
                // Steepest Red segment changes a channel by < 0.5 over 1/8.
                prop_assert!((a.r - b.r).abs() < 0.01);
                prop_assert!((a.g - b.g).abs() < 0.01);
                prop_assert!((a.b - b.b).abs() < 0.01);
            }
        }
    }
}

//! Control parameters and typed extraction from `serde_json::Value` objects.
//!
//! A [`Control`] names a scalar and its documented domain. Values outside the
//! domain are rejected, never clamped, so the caller decides how to react.
//!
//! The `param_*` helpers read a key from a JSON params object. A missing key
//! (or `null`) yields the default; a present key of the wrong JSON type is a
//! [`SurfaceError::ParamTypeMismatch`].

use crate::error::SurfaceError;
use serde_json::Value;

/// Lower bound of a control's domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lower {
    /// `value >= bound`
    Inclusive(f64),
    /// `value > bound`
    Exclusive(f64),
}

/// A named scalar with a documented valid range.
///
/// The upper bound is always inclusive. Non-finite values are rejected by
/// every control, including ones with an infinite upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub lower: Lower,
    pub upper: f64,
}

/// Normalized bud-to-bloom control.
pub const BLOOM: Control = Control::unit("bloom");
/// Normalized order-to-scatter control.
pub const CHAOS: Control = Control::unit("chaos");
/// Lobing frequency of the rose petals.
pub const PETAL_FREQUENCY: Control = Control {
    name: "petal_frequency",
    lower: Lower::Exclusive(0.0),
    upper: f64::INFINITY,
};
/// Half-width of the noise box used by chaos clouds.
pub const NOISE_BOUND: Control = Control {
    name: "noise_bound",
    lower: Lower::Inclusive(0.0),
    upper: f64::INFINITY,
};
/// Total angular sweep of the rose spiral, in radians.
pub const ANGULAR_SPAN: Control = Control {
    name: "angular_span",
    lower: Lower::Exclusive(0.0),
    upper: f64::INFINITY,
};

impl Control {
    /// A control over the closed unit interval `[0, 1]`.
    pub const fn unit(name: &'static str) -> Self {
        Self {
            name,
            lower: Lower::Inclusive(0.0),
            upper: 1.0,
        }
    }

    /// Returns true if `value` lies in this control's domain.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above = match self.lower {
            Lower::Inclusive(lo) => value >= lo,
            Lower::Exclusive(lo) => value > lo,
        };
        above && value <= self.upper
    }

    /// Returns `value` unchanged if it is in range, otherwise
    /// `SurfaceError::InvalidParameterRange`.
    pub fn check(&self, value: f64) -> Result<f64, SurfaceError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(SurfaceError::InvalidParameterRange {
                name: self.name.to_string(),
                value,
                expected: self.describe(),
            })
        }
    }

    /// Human-readable range, e.g. `"[0, 1]"` or `"> 0"`.
    pub fn describe(&self) -> String {
        match (self.lower, self.upper.is_finite()) {
            (Lower::Inclusive(lo), true) => format!("[{lo}, {}]", self.upper),
            (Lower::Exclusive(lo), true) => format!("({lo}, {}]", self.upper),
            (Lower::Inclusive(lo), false) => format!(">= {lo}"),
            (Lower::Exclusive(lo), false) => format!("> {lo}"),
        }
    }
}

/// Names the JSON type of `value` for mismatch messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lookup<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| !v.is_null())
}

fn mismatch(name: &str, expected: &str, got: &Value) -> SurfaceError {
    SurfaceError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: json_type_name(got).to_string(),
    }
}

/// Extracts an `f64` from `params[name]`.
///
/// Accepts both JSON floats and integers.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, SurfaceError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Extracts a `usize` from `params[name]`.
///
/// Only non-negative JSON integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> Result<usize, SurfaceError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Extracts a `u64` from `params[name]`.
pub fn param_u64(params: &Value, name: &str, default: u64) -> Result<u64, SurfaceError> {
    match lookup(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Extracts a `String` from `params[name]`.
pub fn param_string(params: &Value, name: &str, default: &str) -> Result<String, SurfaceError> {
    match lookup(params, name) {
        None => Ok(default.to_owned()),
        Some(v) => v
            .as_str()
            .map(String::from)
            .ok_or_else(|| mismatch(name, "string", v)),
    }
}

//! Helpers for reading loosely typed settings out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key, and a fallback. A missing key or a
//! value of the wrong shape yields the fallback, so callers always end up with
//! a usable setting.

use serde_json::Value;

/// Reads an `f32` from `params[name]`, returning `default` if missing, wrong type,
/// or not finite once narrowed.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Reads a `u32` from `params[name]`, returning `default` if missing, negative,
/// fractional, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads a string slice from `params[name]`, returning `default` if missing or wrong type.
pub fn param_str<'a>(params: &'a Value, name: &str, default: &'a str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or(default)
}

//! Structural acceptance check for newly synthesized generator configs.
//!
//! Create mode starts from zero trust, so the config must prove it carries
//! the minimal renderable shape before a row is inserted. Edit mode skips
//! this entirely: the prior config already satisfied these invariants and
//! edits are accepted as-is once they parse.

use serde_json::Value;

const DIMENSION_MIN: f64 = 100.0;
const DIMENSION_MAX: f64 = 5000.0;

/// Accept or reject a create-mode synthesized config.
///
/// Requirements: an object with a `dimensions` object whose numeric
/// `width`/`height` fall within `[100, 5000]`, a non-null `features` field,
/// and — when `form_fields` is present — an array.
pub fn validate_generator_config(config: &Value) -> bool {
    let Some(obj) = config.as_object() else {
        return false;
    };

    let Some(dims) = obj.get("dimensions").and_then(Value::as_object) else {
        return false;
    };
    let (Some(width), Some(height)) = (
        dims.get("width").and_then(Value::as_f64),
        dims.get("height").and_then(Value::as_f64),
    ) else {
        return false;
    };
    if !(DIMENSION_MIN..=DIMENSION_MAX).contains(&width)
        || !(DIMENSION_MIN..=DIMENSION_MAX).contains(&height)
    {
        return false;
    }

    match obj.get("features") {
        None | Some(Value::Null) => return false,
        Some(_) => {}
    }

    if let Some(fields) = obj.get("form_fields") {
        if !fields.is_array() {
            return false;
        }
    }

    true
}

//! Deep merge for tiered configuration.
//!
//! Objects merge field-by-field with the overlay winning; arrays and
//! scalars are replaced entirely. A whole `sources:` list from a higher
//! tier therefore replaces the lower tier's list rather than appending
//! to it - source order stays under the control of one file.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence.
///
/// - Objects merge recursively: overlay keys override base keys
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - A null overlay preserves the base (null means "not specified")
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge values in order, later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}

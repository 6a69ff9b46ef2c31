//! # Configuration Merge
//!
//! Right-biased recursive merge of JSON configuration trees. This is the
//! algorithmic core of the resolver: schema defaults form the base tree and
//! explicit options are overlaid on top of it.
//!
//! The rules are deliberately small:
//!
//! - If a key exists on both sides and *both* values are objects, the
//!   objects merge field by field.
//! - In every other case (key absent from the base, or either side a
//!   scalar, array, or null) the override value replaces the base value
//!   wholesale. Arrays are never concatenated.
//!
//! This gives the identities `merge(x, {}) == x` and `merge({}, y) == y`,
//! and for disjoint-keyed inputs the union of entries.

use serde_json::Value as JsonValue;

/// Recursively merge override JSON into target.
///
/// Object values merge field by field, with override values taking
/// precedence for conflicts; any non-object value replaces the target
/// entirely.
///
/// # Arguments
///
/// * `target` - The base value to merge into (modified in place)
/// * `overrides` - The override value to merge from
pub fn merge_values(target: &mut JsonValue, overrides: &JsonValue) {
    match target {
        JsonValue::Object(target_map) => {
            if let JsonValue::Object(override_map) = overrides {
                for (key, value) in override_map {
                    if let Some(existing) = target_map.get_mut(key) {
                        if existing.is_object() && value.is_object() {
                            merge_values(existing, value);
                        } else {
                            *existing = value.clone();
                        }
                    } else {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            } else {
                *target = overrides.clone();
            }
        }
        _ => *target = overrides.clone(),
    }
}

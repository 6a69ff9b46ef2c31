//! Property-based tests for the configuration merge.
//!
//! These tests use proptest to generate random JSON trees and verify that
//! the merge identities hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::merge_values;
    use proptest::prelude::*;
    use serde_json::{Map, Value as JsonValue};

    /// Arbitrary JSON values up to a small depth.
    fn arb_json() -> impl Strategy<Value = JsonValue> {
        let leaf = prop_oneof![
            Just(JsonValue::Null),
            any::<bool>().prop_map(JsonValue::from),
            any::<i64>().prop_map(JsonValue::from),
            "[a-z]{0,8}".prop_map(JsonValue::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Arbitrary JSON objects with keys drawn from `keys`.
    fn arb_object(keys: &'static str) -> impl Strategy<Value = Map<String, JsonValue>> {
        prop::collection::btree_map(keys, arb_json(), 0..5)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        /// Property: merging an empty override leaves the base unchanged
        #[test]
        fn merge_empty_override_is_identity(base in arb_object("[a-z]{1,4}")) {
            let mut target = JsonValue::Object(base.clone());
            merge_values(&mut target, &JsonValue::Object(Map::new()));
            prop_assert_eq!(target, JsonValue::Object(base));
        }

        /// Property: merging into an empty base yields the override
        #[test]
        fn merge_into_empty_base_is_override(overrides in arb_object("[a-z]{1,4}")) {
            let mut target = JsonValue::Object(Map::new());
            merge_values(&mut target, &JsonValue::Object(overrides.clone()));
            prop_assert_eq!(target, JsonValue::Object(overrides));
        }

        /// Property: disjoint-keyed inputs merge to exactly the union
        #[test]
        fn merge_disjoint_keys_is_union(
            base in arb_object("[a-d]{1,3}"),
            overrides in arb_object("[e-h]{1,3}"),
        ) {
            let mut target = JsonValue::Object(base.clone());
            merge_values(&mut target, &JsonValue::Object(overrides.clone()));

            let merged = target.as_object().unwrap();
            prop_assert_eq!(merged.len(), base.len() + overrides.len());
            for (key, value) in &base {
                prop_assert_eq!(&merged[key], value);
            }
            for (key, value) in &overrides {
                prop_assert_eq!(&merged[key], value);
            }
        }

        /// Property: every override key is present in the result
        #[test]
        fn merge_result_contains_all_override_keys(
            base in arb_object("[a-f]{1,3}"),
            overrides in arb_object("[a-f]{1,3}"),
        ) {
            let mut target = JsonValue::Object(base);
            merge_values(&mut target, &JsonValue::Object(overrides.clone()));

            let merged = target.as_object().unwrap();
            for key in overrides.keys() {
                prop_assert!(merged.contains_key(key));
            }
        }

        /// Property: a non-object override value always wins verbatim
        #[test]
        fn merge_scalar_override_wins(
            base in arb_object("[a-f]{1,3}"),
            overrides in arb_object("[a-f]{1,3}"),
        ) {
            let mut target = JsonValue::Object(base);
            merge_values(&mut target, &JsonValue::Object(overrides.clone()));

            let merged = target.as_object().unwrap();
            for (key, value) in &overrides {
                if !value.is_object() {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        /// Property: merging the same override twice changes nothing further
        #[test]
        fn merge_is_idempotent_in_override(
            base in arb_object("[a-f]{1,3}"),
            overrides in arb_object("[a-f]{1,3}"),
        ) {
            let mut once = JsonValue::Object(base);
            merge_values(&mut once, &JsonValue::Object(overrides.clone()));

            let mut twice = once.clone();
            merge_values(&mut twice, &JsonValue::Object(overrides));

            prop_assert_eq!(once, twice);
        }
    }
}

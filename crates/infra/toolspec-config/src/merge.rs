//! RFC 7396 JSON Merge Patch, used to layer local config over global config.

use serde_json::Value;

/// Apply an RFC 7396 merge patch.
///
/// Objects merge recursively, `null` deletes a key, and anything else in the
/// patch replaces the target value.
///
/// ```
/// use serde_json::json;
/// use toolspec_config::merge::merge_patch;
///
/// let global = json!({"logging": {"level": "warn", "json": true}});
/// let local = json!({"logging": {"level": "debug"}});
/// assert_eq!(
///     merge_patch(global, local),
///     json!({"logging": {"level": "debug", "json": true}})
/// );
/// ```
pub fn merge_patch(target: Value, patch: Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch;
    };
    let mut target_map = match target {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, patch_value) in patch_map {
        if patch_value.is_null() {
            target_map.remove(&key);
        } else {
            let existing = target_map.remove(&key).unwrap_or(Value::Null);
            target_map.insert(key, merge_patch(existing, patch_value));
        }
    }
    Value::Object(target_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_local_logging_overrides_global() {
        let global = json!({"logging": {"level": "warn"}, "frameworks": {"disabled": ["adk"]}});
        let local = json!({"logging": {"json": true}});
        assert_eq!(
            merge_patch(global, local),
            json!({
                "logging": {"level": "warn", "json": true},
                "frameworks": {"disabled": ["adk"]}
            })
        );
    }

    #[test]
    fn test_disabled_list_replaces_rather_than_appends() {
        let global = json!({"frameworks": {"disabled": ["adk", "crewai"]}});
        let local = json!({"frameworks": {"disabled": ["openai"]}});
        assert_eq!(
            merge_patch(global, local),
            json!({"frameworks": {"disabled": ["openai"]}})
        );
    }

    #[test]
    fn test_null_resets_to_default() {
        let global = json!({"frameworks": {"disabled": ["adk"]}, "logging": {"level": "trace"}});
        let local = json!({"frameworks": null});
        assert_eq!(
            merge_patch(global, local),
            json!({"logging": {"level": "trace"}})
        );
    }

    #[test]
    fn test_object_replaces_scalar_and_back() {
        assert_eq!(
            merge_patch(json!({"logging": "loud"}), json!({"logging": {"json": true}})),
            json!({"logging": {"json": true}})
        );
        assert_eq!(
            merge_patch(json!({"logging": {"json": true}}), json!({"logging": 1})),
            json!({"logging": 1})
        );
    }

    proptest! {
        /// Merging an empty object leaves the target unchanged.
        #[test]
        fn prop_empty_patch_is_identity(target in arb_object(true)) {
            prop_assert_eq!(merge_patch(target.clone(), json!({})), target);
        }

        /// Applying a null-free patch twice equals applying it once.
        #[test]
        fn prop_idempotent_merge(target in arb_object(true), patch in arb_object(false)) {
            let once = merge_patch(target, patch.clone());
            let twice = merge_patch(once.clone(), patch);
            prop_assert_eq!(once, twice);
        }
    }

    fn arb_object(with_null: bool) -> impl Strategy<Value = Value> {
        prop::collection::hash_map("[a-z]{1,3}", arb_value(with_null), 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    fn arb_value(with_null: bool) -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,10}".prop_map(Value::String),
        ];
        let leaf = if with_null {
            prop_oneof![Just(Value::Null), leaf].boxed()
        } else {
            leaf.boxed()
        };
        prop_oneof![
            leaf.clone(),
            prop::collection::hash_map("[a-z]{1,2}", leaf, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    }
}

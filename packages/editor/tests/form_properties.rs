//! Property tests for projection and path-addressed mutation

use payload_editor::{leaves, project, set_at_path, FieldPath};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ]
}

fn payload() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Nested non-empty objects over scalars: every shape is recoverable from
/// its leaves alone
fn object_payload() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 5, |inner| {
        prop::collection::vec(("[a-z]{1,6}", inner), 1..5)
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
    })
}

fn scalar_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(scalar_count).sum(),
        Value::Object(map) => map.values().map(scalar_count).sum(),
        _ => 1,
    }
}

proptest! {
    #[test]
    fn rewriting_every_leaf_reproduces_the_payload(value in payload()) {
        let fields = project(&value, &FieldPath::root());
        let rebuilt = leaves(&fields)
            .into_iter()
            .fold(value.clone(), |acc, (path, leaf)| set_at_path(&acc, path, leaf.value.clone()));

        prop_assert_eq!(rebuilt, value);
    }

    #[test]
    fn leaves_alone_rebuild_object_payloads(value in object_payload()) {
        let fields = project(&value, &FieldPath::root());
        let rebuilt = leaves(&fields)
            .into_iter()
            .fold(json!({}), |acc, (path, leaf)| set_at_path(&acc, path, leaf.value.clone()));

        prop_assert_eq!(rebuilt, value);
    }

    #[test]
    fn projection_has_one_leaf_per_scalar(value in payload()) {
        let fields = project(&value, &FieldPath::root());
        prop_assert_eq!(leaves(&fields).len(), scalar_count(&value));
    }

    #[test]
    fn set_at_path_leaves_input_untouched(value in payload(), text in "[a-z]{0,4}") {
        let before = value.clone();
        let fields = project(&value, &FieldPath::root());

        for (path, _) in leaves(&fields) {
            let updated = set_at_path(&value, path, Value::String(text.clone()));
            prop_assert_eq!(&value, &before);

            // The leaf now reads back as the new text
            let pointer = if path.is_root() {
                String::new()
            } else {
                format!("/{}", path.segments().join("/"))
            };
            prop_assert_eq!(
                updated.pointer(&pointer),
                Some(&Value::String(text.clone()))
            );
        }
    }
}

//! # Path-Addressed Mutations
//!
//! Replace exactly one slot of a payload, addressed by a [`FieldPath`].
//!
//! ## Semantics
//!
//! - The input is never touched; the result is a fresh tree.
//! - The root path replaces the whole payload.
//! - Any intermediate that is missing or not a container becomes an empty
//!   object. Arrays are never invented.
//! - An index past the end of an array pads it with `null`, up to
//!   [`MAX_ARRAY_PADDING`] new slots.
//! - A segment that is not an index cannot address an array, and neither can
//!   an index beyond the padding limit. The write is dropped and the tree
//!   comes back unchanged.

use crate::path::FieldPath;
use serde_json::{Map, Value};

/// Most `null` slots a single write may append to an array
pub const MAX_ARRAY_PADDING: usize = 10_000;

/// Set the value at `path`, returning the updated tree
pub fn set_at_path(root: &Value, path: &FieldPath, value: Value) -> Value {
    let Some((last, parents)) = path.segments().split_last() else {
        return value;
    };

    let mut updated = root.clone();
    let mut current = &mut updated;

    for segment in parents {
        ensure_container(current);
        match slot_mut(current, segment) {
            Some(slot) => current = slot,
            None => return dropped_write(root, path),
        }
    }

    ensure_container(current);
    match slot_mut(current, last) {
        Some(slot) => *slot = value,
        None => return dropped_write(root, path),
    }

    updated
}

fn ensure_container(value: &mut Value) {
    if !matches!(value, Value::Object(_) | Value::Array(_)) {
        *value = Value::Object(Map::new());
    }
}

fn slot_mut<'a>(container: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match container {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = FieldPath::index_of(segment)?;
            if items.len() <= index {
                let len = index.checked_add(1)?;
                if len - items.len() > MAX_ARRAY_PADDING {
                    return None;
                }
                items.resize(len, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

fn dropped_write(root: &Value, path: &FieldPath) -> Value {
    tracing::debug!("set_at_path: '{}' has no addressable array slot", path);
    root.clone()
}

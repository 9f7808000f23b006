//! # Structural Form Projection
//!
//! Maps an arbitrary payload onto a tree of editable field descriptors.
//!
//! ```text
//! {"a": {"b": 1}, "tags": ["x"]}
//!        ↓ project
//! a:            Group(Object)
//!   b:          Leaf(Number) path=a.b
//! tags:         Group(Array)
//!   0:          Leaf(Text)   path=tags.0
//! ```
//!
//! Projection is pure. A leaf edit produces a [`FieldEdit`] that the owner of
//! the payload applies.

use crate::path::FieldPath;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Input control kind for a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Object,
    Array,
}

/// An editable scalar bound to a path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafField {
    pub kind: InputKind,
    /// Text shown in the input
    pub display: String,
    /// Scalar the leaf was projected from
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldBody {
    Group {
        container: ContainerKind,
        children: Vec<FieldDescriptor>,
    },
    Leaf(LeafField),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Object key or array index; `None` for a scalar payload root
    pub label: Option<String>,
    pub path: FieldPath,
    pub body: FieldBody,
}

/// Edit emitted by a leaf: (field path, new text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub path: FieldPath,
    pub text: String,
}

impl FieldDescriptor {
    pub fn leaf(&self) -> Option<&LeafField> {
        match &self.body {
            FieldBody::Leaf(leaf) => Some(leaf),
            FieldBody::Group { .. } => None,
        }
    }

    /// Build the edit this field reports when its text changes
    ///
    /// Returns `None` for groups, which have no input of their own.
    pub fn edit(&self, text: impl Into<String>) -> Option<FieldEdit> {
        self.leaf().map(|_| FieldEdit {
            path: self.path.clone(),
            text: text.into(),
        })
    }
}

/// Project `data` located at `path` into field descriptors
pub fn project(data: &Value, path: &FieldPath) -> Vec<FieldDescriptor> {
    match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| entry(index.to_string(), item, path.child_index(index)))
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| entry(key.clone(), value, path.child_key(key)))
            .collect(),
        scalar => vec![FieldDescriptor {
            label: None,
            path: path.clone(),
            body: FieldBody::Leaf(leaf_for(scalar)),
        }],
    }
}

fn entry(label: String, value: &Value, path: FieldPath) -> FieldDescriptor {
    let body = match value {
        Value::Array(_) => FieldBody::Group {
            container: ContainerKind::Array,
            children: project(value, &path),
        },
        Value::Object(_) => FieldBody::Group {
            container: ContainerKind::Object,
            children: project(value, &path),
        },
        scalar => FieldBody::Leaf(leaf_for(scalar)),
    };

    FieldDescriptor {
        label: Some(label),
        path,
        body,
    }
}

fn leaf_for(value: &Value) -> LeafField {
    let kind = if value.is_number() {
        InputKind::Number
    } else {
        InputKind::Text
    };

    LeafField {
        kind,
        display: display_text(value),
        value: value.clone(),
    }
}

/// Text an input shows for a scalar; falsy scalars show as empty
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Containers never reach a leaf
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Leaf fields in render order
pub fn leaves(fields: &[FieldDescriptor]) -> Vec<(&FieldPath, &LeafField)> {
    let mut out = Vec::new();
    collect_leaves(fields, &mut out);
    out
}

fn collect_leaves<'a>(
    fields: &'a [FieldDescriptor],
    out: &mut Vec<(&'a FieldPath, &'a LeafField)>,
) {
    for field in fields {
        match &field.body {
            FieldBody::Leaf(leaf) => out.push((&field.path, leaf)),
            FieldBody::Group { children, .. } => collect_leaves(children, out),
        }
    }
}

/// Indented plain-text rendering of a projection
pub fn outline(fields: &[FieldDescriptor]) -> String {
    let mut out = String::new();
    write_outline(fields, 0, &mut out);
    out
}

fn write_outline(fields: &[FieldDescriptor], depth: usize, out: &mut String) {
    for field in fields {
        let indent = "  ".repeat(depth);
        let label = field.label.as_deref().unwrap_or("(root)");
        // Writing into a String cannot fail
        match &field.body {
            FieldBody::Group { container, children } => {
                let marker = match container {
                    ContainerKind::Object => "{}",
                    ContainerKind::Array => "[]",
                };
                let _ = writeln!(out, "{indent}{label}: {marker}");
                write_outline(children, depth + 1, out);
            }
            FieldBody::Leaf(leaf) => {
                let kind = match leaf.kind {
                    InputKind::Number => "number",
                    InputKind::Text => "text",
                };
                let _ = writeln!(out, "{indent}{label}: [{kind}] {}", leaf.display);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_children_follow_insertion_order() {
        let data = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let fields = project(&data, &FieldPath::root());

        let labels: Vec<_> = fields.iter().map(|f| f.label.clone().unwrap()).collect();
        assert_eq!(labels, ["zeta", "alpha", "mid"]);
        assert_eq!(fields[1].path.to_string(), "alpha");
    }

    #[test]
    fn test_array_children_are_index_addressed() {
        let data = json!({"tags": ["a", "b"]});
        let fields = project(&data, &FieldPath::root());

        let FieldBody::Group { container, children } = &fields[0].body else {
            panic!("Expected group");
        };
        assert_eq!(*container, ContainerKind::Array);
        assert_eq!(children[0].path.to_string(), "tags.0");
        assert_eq!(children[1].path.to_string(), "tags.1");
        assert_eq!(children[1].label.as_deref(), Some("1"));
    }

    #[test]
    fn test_leaf_kind_follows_runtime_type() {
        let data = json!({"n": 4.5, "s": "x", "b": true, "z": null});
        let fields = project(&data, &FieldPath::root());
        let kinds: Vec<_> = fields.iter().map(|f| f.leaf().unwrap().kind).collect();

        use InputKind::{Number, Text};
        assert_eq!(kinds, [Number, Text, Text, Text]);
    }

    #[test]
    fn test_falsy_scalars_display_empty() {
        assert_eq!(display_text(&json!(null)), "");
        assert_eq!(display_text(&json!(false)), "");
        assert_eq!(display_text(&json!(0)), "");
        assert_eq!(display_text(&json!(0.0)), "");
        assert_eq!(display_text(&json!("")), "");
        assert_eq!(display_text(&json!(12)), "12");
        assert_eq!(display_text(&json!(true)), "true");
        assert_eq!(display_text(&json!("hi")), "hi");
    }

    #[test]
    fn test_scalar_root_is_single_unlabelled_leaf() {
        let fields = project(&json!("plain"), &FieldPath::root());
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, None);
        assert!(fields[0].path.is_root());
    }

    #[test]
    fn test_null_renders_like_scalar() {
        let fields = project(&json!({"gone": null}), &FieldPath::root());
        let leaf = fields[0].leaf().unwrap();
        assert_eq!(leaf.kind, InputKind::Text);
        assert_eq!(leaf.value, Value::Null);
    }

    #[test]
    fn test_projection_under_non_root_path() {
        let fields = project(&json!({"b": 1}), &FieldPath::parse("a"));
        assert_eq!(fields[0].path.to_string(), "a.b");
    }

    #[test]
    fn test_leaves_flatten_in_render_order() {
        let data = json!({"a": {"b": 1, "c": [true, "x"]}, "d": null});
        let fields = project(&data, &FieldPath::root());
        let paths: Vec<String> = leaves(&fields)
            .iter()
            .map(|(p, _)| p.to_string())
            .collect();
        assert_eq!(paths, ["a.b", "a.c.0", "a.c.1", "d"]);
    }

    #[test]
    fn test_edit_only_from_leaves() {
        let fields = project(&json!({"a": {"b": 1}}), &FieldPath::root());
        assert!(fields[0].edit("x").is_none());

        let FieldBody::Group { children, .. } = &fields[0].body else {
            panic!("Expected group");
        };
        let edit = children[0].edit("2").unwrap();
        assert_eq!(edit.path.to_string(), "a.b");
        assert_eq!(edit.text, "2");
    }

    #[test]
    fn test_outline_rendering() {
        let data = json!({"a": {"b": 1}, "tags": ["x"]});
        let fields = project(&data, &FieldPath::root());
        assert_eq!(
            outline(&fields),
            "a: {}\n  b: [number] 1\ntags: []\n  0: [text] x\n"
        );
    }
}

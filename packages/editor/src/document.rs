//! # Payload Document
//!
//! The payload held twice: as a structured value and as the serialized text
//! shown in the raw editor. Both change together on every accepted edit.
//!
//! ## Lifecycle
//!
//! ```text
//! Sample → Serialize → Edit (raw or field) → Reparse → Canonical body
//!   ↓          ↓              ↓                 ↓            ↓
//! Value   pretty text    value + text       Value       compact JSON
//! ```
//!
//! Raw text is kept even when it does not parse; the structured value then
//! stays at the last text that did.

use crate::errors::EditorResult;
use crate::form::FieldEdit;
use crate::mutations::set_at_path;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct PayloadDocument {
    /// Last structured value that parsed
    value: Value,

    /// Text as displayed in the raw editor
    raw: String,

    /// Current version number (increments on each accepted change)
    pub version: u64,
}

impl PayloadDocument {
    pub fn from_value(value: Value) -> Self {
        let raw = serialize(&value);
        Self {
            value,
            raw,
            version: 0,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Take new raw text; the value follows only if the text parses
    ///
    /// The raw text is stored either way.
    pub fn replace_raw(&mut self, text: impl Into<String>) -> EditorResult<()> {
        self.raw = text.into();
        self.version += 1;

        let parsed: Value = serde_json::from_str(&self.raw)?;
        self.value = parsed;
        Ok(())
    }

    /// Replace the structured value and re-serialize the text
    pub fn set_value(&mut self, value: Value) {
        self.raw = serialize(&value);
        self.value = value;
        self.version += 1;
    }

    /// Apply a form edit; the leaf becomes the edit's text
    pub fn set_field(&mut self, edit: &FieldEdit) {
        let updated = set_at_path(&self.value, &edit.path, Value::String(edit.text.clone()));
        self.set_value(updated);
    }

    /// Parse the current raw text afresh
    pub fn reparse(&self) -> EditorResult<Value> {
        Ok(serde_json::from_str(&self.raw)?)
    }

    /// Compact encoding of the parsed raw text
    pub fn canonical_body(&self) -> EditorResult<String> {
        let value = self.reparse()?;
        Ok(serde_json::to_string(&value)?)
    }
}

/// 2-space pretty JSON
fn serialize(value: &Value) -> String {
    // Serializing a Value into memory cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditorError;
    use crate::path::FieldPath;
    use serde_json::json;

    #[test]
    fn test_create_from_value() {
        let doc = PayloadDocument::from_value(json!({"a": {"b": 1}}));
        assert_eq!(doc.version, 0);
        assert_eq!(doc.raw(), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
        assert_eq!(doc.value(), &json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_replace_raw_with_valid_json() {
        let mut doc = PayloadDocument::from_value(json!({}));
        doc.replace_raw("{\"x\": [1, 2]}").unwrap();

        assert_eq!(doc.value(), &json!({"x": [1, 2]}));
        assert_eq!(doc.raw(), "{\"x\": [1, 2]}");
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_replace_raw_with_invalid_json_keeps_last_value() {
        let mut doc = PayloadDocument::from_value(json!({"keep": true}));
        let result = doc.replace_raw("{\"keep\": ");

        assert!(matches!(result, Err(EditorError::Parse(_))));
        assert_eq!(doc.raw(), "{\"keep\": ");
        assert_eq!(doc.value(), &json!({"keep": true}));
    }

    #[test]
    fn test_set_field_stores_text() {
        let mut doc = PayloadDocument::from_value(json!({"a": {"b": 1}}));
        doc.set_field(&FieldEdit {
            path: FieldPath::parse("a.b"),
            text: "2".to_string(),
        });

        assert_eq!(doc.value(), &json!({"a": {"b": "2"}}));
        assert_eq!(doc.reparse().unwrap(), json!({"a": {"b": "2"}}));
    }

    #[test]
    fn test_canonical_body_is_compact() {
        let mut doc = PayloadDocument::from_value(json!({}));
        doc.replace_raw("{\n   \"a\" :   1 }").unwrap();
        assert_eq!(doc.canonical_body().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_canonical_body_fails_on_broken_text() {
        let mut doc = PayloadDocument::from_value(json!({}));
        let _ = doc.replace_raw("nope");
        assert!(doc.canonical_body().is_err());
    }
}

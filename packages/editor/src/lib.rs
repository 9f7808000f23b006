//! # Payload Editor
//!
//! Bidirectional JSON editing engine: one payload, two views.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐          ┌──────────────────────┐
//! │ raw text surface     │          │ structural form      │
//! │  - cursor preserved  │          │  - projected fields  │
//! │  - recorded history  │          │  - path-addressed    │
//! └──────────────────────┘          └──────────────────────┘
//!            │ parse                            │ set_at_path
//!            ↓                                  ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │ PayloadDocument: structured value + serialized text     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One source of truth**: both views converge on a single value
//! 2. **Copy-on-write**: mutations return new trees, never alias old ones
//! 3. **Linear history**: undo/redo moves over text snapshots only
//! 4. **Explicit cursor state**: selection flows capture → mutate → restore
//!
//! ## Usage
//!
//! ```rust
//! use payload_editor::{leaves, project, FieldEdit, FieldPath, PayloadDocument};
//! use serde_json::json;
//!
//! let mut doc = PayloadDocument::from_value(json!({"a": {"b": 1}}));
//! let fields = project(doc.value(), &FieldPath::root());
//!
//! let path = leaves(&fields)[0].0.clone();
//! doc.set_field(&FieldEdit { path, text: "2".into() });
//! assert_eq!(doc.value(), &json!({"a": {"b": "2"}}));
//! ```

mod cursor;
mod document;
mod errors;
mod form;
mod history;
mod mutations;
mod path;

pub use cursor::{BufferSurface, CursorSnapshot, CursorTracker, TextSurface};
pub use document::PayloadDocument;
pub use errors::{EditorError, EditorResult, PathError};
pub use form::{
    display_text, leaves, outline, project, ContainerKind, FieldBody, FieldDescriptor, FieldEdit,
    InputKind, LeafField,
};
pub use history::{EditHistory, HistoryEntry};
pub use mutations::{set_at_path, MAX_ARRAY_PADDING};
pub use path::FieldPath;

// Re-export the value type for convenience
pub use serde_json::Value as PayloadValue;

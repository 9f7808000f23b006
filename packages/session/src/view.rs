//! Presentation output: what a host renders for the editor

use crate::controller::EditorState;
use payload_editor::{outline, FieldDescriptor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub visible: bool,
    pub title: String,
    pub raw_text: String,
    pub error: Option<String>,
    pub state: EditorState,
    pub fields: Vec<FieldDescriptor>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl EditorView {
    /// Plain-text rendering of the form fields
    pub fn form_outline(&self) -> String {
        outline(&self.fields)
    }
}

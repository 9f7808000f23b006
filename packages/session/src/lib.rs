//! # Payload Session
//!
//! Editor lifetime around the payload engine: shortcut handling, schema
//! validation and submission.
//!
//! ```text
//! KeyboardHub ──KeySubscription──┐
//!                                ↓
//! TextSurface ──▶ PayloadEditorController ──▶ PayloadValidator
//! form fields ──▶        │                 ──▶ Transport
//!                        ↓
//!                    EditorView
//! ```

mod config;
mod controller;
mod errors;
mod keyboard;
mod logging;
mod source;
mod transport;
mod validator;
mod view;

pub use config::{EditorConfig, EndpointConfig, DEFAULT_CONFIG_NAME};
pub use controller::{
    EditorOptions, EditorState, PayloadEditorController, SubmitOutcome, SubmitTicket,
};
pub use errors::{SessionError, SessionResult, TransportError};
pub use keyboard::{KeyEvent, KeySubscription, KeyboardHub, Modifiers, ShortcutAction};
pub use logging::init_tracing;
pub use source::{FilePayloadSource, PayloadSource, StaticPayloadSource};
pub use transport::{HttpMethod, HttpTransport, SubmitRequest, Transport, TransportResponse};
pub use validator::{
    AcceptAll, PayloadValidator, SchemaValidator, ValidationIssue, ValidationReport,
};
pub use view::EditorView;

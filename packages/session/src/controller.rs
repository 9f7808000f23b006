//! # Payload Editor Controller
//!
//! Owns the payload and keeps the raw text view, the structural form and
//! the undo history in step.
//!
//! ## States
//!
//! ```text
//!            raw edit (parses) / field edit / undo / redo
//!        ┌──────────────────────────────────────────────┐
//!        ↓                                              │
//!     Clean ──raw edit (broken)──▶ ParseError ──────────┤
//!        │                                              │
//!        ├──submit (schema fails)──▶ ValidationError ───┤
//!        │                                              │
//!        └──submit──▶ Submitting ──ok──▶ Clean          │
//!                         └──err──▶ SubmitFailed ───────┘
//! ```
//!
//! Submission is split into [`PayloadEditorController::begin_submit`] and
//! [`PayloadEditorController::finish_submit`] so a host event loop can run
//! the transport future itself. A ticket issued before [`close`] is stale
//! and its response is discarded.
//!
//! Every [`open`] after a [`close`] starts a fresh session: document,
//! history and error state are rebuilt from the initial payload.
//!
//! [`open`]: PayloadEditorController::open
//! [`close`]: PayloadEditorController::close

use crate::config::EditorConfig;
use crate::errors::{SessionError, SessionResult, TransportError};
use crate::keyboard::{KeyEvent, KeySubscription, KeyboardHub, ShortcutAction};
use crate::source::PayloadSource;
use crate::transport::{HttpMethod, SubmitRequest, Transport, TransportResponse};
use crate::validator::{PayloadValidator, SchemaValidator};
use crate::view::EditorView;
use payload_editor::{
    project, CursorTracker, EditHistory, EditorError, FieldDescriptor, FieldEdit, FieldPath,
    PathError, PayloadDocument, TextSurface,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditorState {
    Clean,
    ParseError,
    ValidationError,
    Submitting,
    SubmitFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub title: String,
    pub url: String,
    pub method: HttpMethod,
    pub record_structural_edits: bool,
    pub strict_paths: bool,
    pub history_limit: usize,
}

impl From<&EditorConfig> for EditorOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            title: config.title.clone(),
            url: config.endpoint.url.clone(),
            method: config.endpoint.method,
            record_structural_edits: config.record_structural_edits,
            strict_paths: config.strict_paths,
            history_limit: config.history_limit,
        }
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

/// A validated submission waiting for its transport result
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    id: u64,
    generation: u64,
    request: SubmitRequest,
}

impl SubmitTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &SubmitRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered(TransportResponse),
    Failed(TransportError),
    /// Response arrived for a closed or reopened editor
    Discarded,
}

pub struct PayloadEditorController<S: TextSurface> {
    surface: S,
    /// Sample payload each session starts from
    initial: Value,
    document: PayloadDocument,
    history: EditHistory,
    validator: Box<dyn PayloadValidator>,
    transport: Arc<dyn Transport>,
    options: EditorOptions,

    /// State outside of an in-flight submission
    state: EditorState,
    error: Option<String>,

    /// Ticket id of the submission in flight
    in_flight: Option<u64>,
    next_ticket: u64,

    /// Bumped on every close; tickets from older generations are stale
    generation: u64,

    keys: Option<KeySubscription>,
    visible: bool,
}

impl<S: TextSurface> PayloadEditorController<S> {
    pub fn new(
        mut surface: S,
        payload: Value,
        validator: Box<dyn PayloadValidator>,
        transport: Arc<dyn Transport>,
        options: EditorOptions,
    ) -> Self {
        let document = PayloadDocument::from_value(payload.clone());
        let history = EditHistory::with_limit(document.raw(), options.history_limit);
        surface.replace_text(document.raw());

        Self {
            surface,
            initial: payload,
            document,
            history,
            validator,
            transport,
            options,
            state: EditorState::Clean,
            error: None,
            in_flight: None,
            next_ticket: 0,
            generation: 0,
            keys: None,
            visible: false,
        }
    }

    /// Build from a payload source, compiling its schema
    pub fn from_source(
        surface: S,
        source: &dyn PayloadSource,
        transport: Arc<dyn Transport>,
        config: &EditorConfig,
    ) -> SessionResult<Self> {
        let payload = source.sample_payload()?;
        let validator = SchemaValidator::compile(&source.schema()?)?;

        Ok(Self::new(
            surface,
            payload,
            Box::new(validator),
            transport,
            EditorOptions::from(config),
        ))
    }

    /// Mount: show the editor and start listening for shortcuts
    ///
    /// Opening a closed editor discards the previous session's edits.
    pub fn open(&mut self, hub: &KeyboardHub) {
        if self.keys.is_none() {
            self.keys = Some(hub.subscribe());
        }
        if !self.visible {
            self.reset();
        }
        self.visible = true;
        tracing::debug!("Editor opened (generation {})", self.generation);
    }

    fn reset(&mut self) {
        self.document = PayloadDocument::from_value(self.initial.clone());
        self.history = EditHistory::with_limit(self.document.raw(), self.options.history_limit);
        self.surface.replace_text(self.document.raw());
        self.mark_clean();
    }

    /// Unmount: stop listening and invalidate pending submissions
    pub fn close(&mut self) {
        self.keys = None;
        self.visible = false;
        self.in_flight = None;
        self.generation += 1;
        tracing::debug!("Editor closed");
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> EditorState {
        if self.in_flight.is_some() {
            EditorState::Submitting
        } else {
            self.state
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn payload(&self) -> &Value {
        self.document.value()
    }

    pub fn raw_text(&self) -> &str {
        self.document.raw()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface the user types into; call
    /// [`handle_text_input`](Self::handle_text_input) after changing it
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn fields(&self) -> Vec<FieldDescriptor> {
        project(self.document.value(), &FieldPath::root())
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            visible: self.visible,
            title: self.options.title.clone(),
            raw_text: self.document.raw().to_string(),
            error: self.error.clone(),
            state: self.state(),
            fields: self.fields(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    /// The free-text surface changed
    ///
    /// The text is recorded whether or not it parses. The caret survives the
    /// surface being re-rendered with the stored text.
    pub fn handle_text_input(&mut self) {
        let content = self.surface.text().to_string();
        let history = &mut self.history;
        let document = &mut self.document;

        let parsed = CursorTracker::preserve(&mut self.surface, |surface| {
            history.record(content.as_str());
            let parsed = document.replace_raw(content.as_str());
            surface.replace_text(document.raw());
            parsed
        });

        match parsed {
            Ok(()) => {
                tracing::debug!("Raw edit accepted (version {})", self.document.version);
                self.mark_clean();
            }
            Err(e) => {
                tracing::warn!("Raw edit does not parse: {}", e);
                self.state = EditorState::ParseError;
                self.error = Some(e.to_string());
            }
        }
    }

    /// A form field reported new text: (field path, new text)
    pub fn handle_field_input(&mut self, path: &str, text: &str) -> SessionResult<()> {
        let path = if self.options.strict_paths {
            FieldPath::parse_strict(path).map_err(|e| self.reject_path(e))?
        } else {
            FieldPath::parse(path)
        };

        self.apply_field_edit(FieldEdit {
            path,
            text: text.to_string(),
        });
        Ok(())
    }

    pub fn handle_field_change(&mut self, edit: &FieldEdit) -> SessionResult<()> {
        self.handle_field_input(&edit.path.to_string(), &edit.text)
    }

    fn apply_field_edit(&mut self, edit: FieldEdit) {
        self.document.set_field(&edit);
        self.surface.replace_text(self.document.raw());

        if self.options.record_structural_edits {
            self.history.record(self.document.raw());
        }

        tracing::debug!(
            "Field edit at '{}' (version {})",
            edit.path,
            self.document.version
        );
        self.mark_clean();
    }

    fn reject_path(&mut self, e: PathError) -> SessionError {
        let err = SessionError::Editor(EditorError::Path(e));
        tracing::warn!("Rejected field edit: {}", err);
        self.error = Some(err.to_string());
        err
    }

    pub fn undo(&mut self) {
        let snapshot = self.history.undo().to_string();
        tracing::debug!("Undo to history entry {}", self.history.index());
        self.show_snapshot(snapshot);
    }

    pub fn redo(&mut self) {
        let snapshot = self.history.redo().to_string();
        tracing::debug!("Redo to history entry {}", self.history.index());
        self.show_snapshot(snapshot);
    }

    /// Display a history entry without recording it
    ///
    /// At a history boundary the snapshot is the text already shown and
    /// nothing changes.
    fn show_snapshot(&mut self, snapshot: String) {
        if snapshot == self.document.raw() {
            return;
        }

        match self.document.replace_raw(snapshot) {
            Ok(()) => self.mark_clean(),
            Err(e) => {
                self.state = EditorState::ParseError;
                self.error = Some(e.to_string());
            }
        }
        self.surface.replace_text(self.document.raw());
    }

    fn mark_clean(&mut self) {
        self.state = EditorState::Clean;
        self.error = None;
    }

    /// Apply an undo/redo shortcut; returns whether the event was consumed
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.visible {
            return false;
        }

        match ShortcutAction::from_event(event) {
            Some(ShortcutAction::Undo) => self.undo(),
            Some(ShortcutAction::Redo) => self.redo(),
            None => return false,
        }
        true
    }

    /// Handle every queued key event; returns how many were shortcuts
    pub fn pump_keys(&mut self) -> usize {
        let mut handled = 0;

        while let Some(event) = self.keys.as_mut().and_then(KeySubscription::try_next) {
            if self.handle_key(&event) {
                handled += 1;
            }
        }

        handled
    }

    /// Validate the payload and hand out a ticket for one submission
    pub fn begin_submit(&mut self) -> SessionResult<SubmitTicket> {
        if !self.visible {
            return Err(SessionError::Closed);
        }
        if self.in_flight.is_some() {
            return Err(SessionError::SubmitInProgress);
        }
        if !matches!(self.state, EditorState::Clean | EditorState::SubmitFailed) {
            return Err(SessionError::NotSubmittable(self.state));
        }

        let value = match self.document.reparse() {
            Ok(value) => value,
            Err(e) => {
                self.state = EditorState::ParseError;
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        let report = self.validator.validate(&value);
        if !report.valid {
            let err = SessionError::Validation {
                summary: report.summary(),
            };
            tracing::warn!("Submit blocked: {}", err);
            self.state = EditorState::ValidationError;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let body = serde_json::to_string(&value)?;
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(id);

        tracing::info!("Submitting payload #{} to {}", id, self.options.url);

        Ok(SubmitTicket {
            id,
            generation: self.generation,
            request: SubmitRequest {
                url: self.options.url.clone(),
                method: self.options.method,
                body,
            },
        })
    }

    /// Apply the transport result for a ticket
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<TransportResponse, TransportError>,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket.id) {
            tracing::debug!("Discarding response for stale submission #{}", ticket.id);
            return SubmitOutcome::Discarded;
        }
        self.in_flight = None;

        match outcome {
            Ok(response) => {
                tracing::info!("Submission #{} accepted ({})", ticket.id, response.status);
                if self.state == EditorState::SubmitFailed {
                    self.state = EditorState::Clean;
                }
                if self.state == EditorState::Clean {
                    self.error = None;
                }
                SubmitOutcome::Delivered(response)
            }
            Err(e) => {
                tracing::warn!("Submission #{} failed: {}", ticket.id, e);
                self.state = EditorState::SubmitFailed;
                self.error = Some(SessionError::Transport(e.clone()).to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validate, send and apply the result in one call
    pub async fn submit(&mut self) -> SessionResult<TransportResponse> {
        let ticket = self.begin_submit()?;
        let transport = Arc::clone(&self.transport);
        let outcome = transport.submit(ticket.request.clone()).await;

        match self.finish_submit(ticket, outcome) {
            SubmitOutcome::Delivered(response) => Ok(response),
            SubmitOutcome::Failed(e) => Err(e.into()),
            SubmitOutcome::Discarded => Err(SessionError::Closed),
        }
    }

    /// Transport used by [`submit`](Self::submit)
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }
}

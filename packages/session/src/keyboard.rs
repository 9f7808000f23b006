//! # Keyboard Stream
//!
//! Key events are published process-wide, wider than any one editor.
//! An editor listens through a [`KeySubscription`] it owns; dropping the
//! subscription deregisters the listener.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: char,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: char) -> Self {
        Self::new(key, Modifiers::default())
    }

    pub fn ctrl(key: char) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        )
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        )
    }

    pub fn meta(key: char) -> Self {
        Self::new(
            key,
            Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        )
    }
}

/// Editor actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

impl ShortcutAction {
    /// Ctrl/Cmd+Z undoes, adding Shift redoes
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let Modifiers { ctrl, meta, shift, .. } = event.modifiers;

        if !(ctrl || meta) || !event.key.eq_ignore_ascii_case(&'z') {
            return None;
        }

        Some(if shift { Self::Redo } else { Self::Undo })
    }
}

/// Process-wide key event source
#[derive(Debug, Clone)]
pub struct KeyboardHub {
    sender: broadcast::Sender<KeyEvent>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Deliver an event to every live subscription
    ///
    /// Returns how many listeners received it.
    pub fn publish(&self, event: KeyEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> KeySubscription {
        KeySubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for KeyboardHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Registered listener; deregisters on drop
#[derive(Debug)]
pub struct KeySubscription {
    receiver: broadcast::Receiver<KeyEvent>,
}

impl KeySubscription {
    /// Next queued event, if any
    ///
    /// Events lost to a slow listener are skipped.
    pub fn try_next(&mut self) -> Option<KeyEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Key subscription lagged, skipped {} events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next event; `None` once the hub is gone
    pub async fn next(&mut self) -> Option<KeyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Key subscription lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

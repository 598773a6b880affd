use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod list;

pub use list::{ListContainer, ListItem, RowId, RowPhase, RowView};

/// Message exchanged over the popup UI bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMessage {
    pub r#type: String,
    pub payload: Value,
}

impl UiMessage {
    pub fn new(r#type: impl Into<String>, payload: Value) -> Self {
        Self {
            r#type: r#type.into(),
            payload,
        }
    }
}

/// Outgoing side of the bridge to the popup markup.
pub trait UiBridge {
    /// Sends a message to the popup view.
    fn send(&self, message: UiMessage);
}

/// Bridge that buffers outgoing messages until the embedder drains them.
#[derive(Debug, Default)]
pub struct QueuedUiBridge {
    queue: RefCell<Vec<UiMessage>>,
}

impl QueuedUiBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued message, oldest first.
    pub fn drain(&self) -> Vec<UiMessage> {
        self.queue.take()
    }

    /// Returns the most recent queued message without draining.
    pub fn latest(&self) -> Option<UiMessage> {
        self.queue.borrow().last().cloned()
    }
}

impl UiBridge for QueuedUiBridge {
    fn send(&self, message: UiMessage) {
        self.queue.borrow_mut().push(message);
    }
}

/// A single text slot in the popup, such as the tab counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextField {
    text: String,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Decrements a numeric field by one.
    ///
    /// Only applies when the field currently holds a positive integer; any
    /// other content is left untouched. Returns whether the field changed.
    pub fn decrement_count(&mut self) -> bool {
        match self.text.trim().parse::<i64>() {
            Ok(current) if current > 0 => {
                self.text = (current - 1).to_string();
                true
            }
            _ => false,
        }
    }
}

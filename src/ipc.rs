use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ui::{RowId, UiBridge, UiMessage};

use crate::state::PopupState;

pub const STATE_MESSAGE: &str = "state.popup";

/// Messages the popup view sends back to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    Ready,
    CloseRow { row: RowId },
}

#[derive(Debug, Deserialize)]
struct RowPayload {
    row: RowId,
}

impl IncomingMessage {
    /// Decodes a bridge message. Unknown types and malformed payloads yield
    /// `None`.
    pub fn parse(message: &UiMessage) -> Option<Self> {
        match message.r#type.as_str() {
            "ui.ready" => Some(Self::Ready),
            "tab.close" => match RowPayload::deserialize(&message.payload) {
                Ok(payload) => Some(Self::CloseRow { row: payload.row }),
                Err(err) => {
                    warn!(error = %err, "malformed tab.close payload");
                    None
                }
            },
            other => {
                debug!(kind = other, "ignoring UI message");
                None
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct StatePayload<'a> {
    total_tabs: &'a str,
    total_memory: &'a str,
    items: &'a [ui::ListItem],
}

/// Pushes a full snapshot of the popup to the view.
pub fn send_state(bridge: &dyn UiBridge, state: &PopupState) {
    let payload = StatePayload {
        total_tabs: state.total_tabs.text(),
        total_memory: state.total_memory.text(),
        items: state.list.items(),
    };
    let Ok(payload) = serde_json::to_value(&payload) else {
        warn!("failed to encode popup state");
        return;
    };
    bridge.send(UiMessage::new(STATE_MESSAGE, payload));
}

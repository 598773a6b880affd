use serde::Serialize;
use ui::{ListContainer, RowId, TextField};

use crate::render::CloseBinding;

/// Everything the popup displays, owned explicitly instead of looked up
/// from a global document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PopupState {
    pub list: ListContainer,
    pub total_tabs: TextField,
    pub total_memory: TextField,
    /// Close actions for the rows currently rendered.
    pub bindings: Vec<CloseBinding>,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self, row: RowId) -> Option<CloseBinding> {
        self.bindings.iter().find(|binding| binding.row == row).copied()
    }

    /// Resets the list and bindings ahead of a fresh load.
    pub fn reset_list(&mut self) {
        self.list.clear();
        self.bindings.clear();
    }

    pub fn show_error(&mut self, description: &str) {
        self.list.show_error(format!("Error: {description}"));
        self.bindings.clear();
    }

    pub fn forget_row(&mut self, row: RowId) {
        self.bindings.retain(|binding| binding.row != row);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use tabs::TabId;

/// Handle to a rendered row. Ids are never reused within a container, so a
/// stale handle cannot address a row rendered later.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual lifecycle of a row. Removed rows leave the container entirely.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPhase {
    Rendered,
    Fading,
}

/// One tab line in the popup list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RowId,
    pub tab: TabId,
    pub title: String,
    pub tooltip: String,
    pub domain: String,
    pub process: String,
    pub memory: String,
    /// Memory could not be measured; the label is styled as secondary text.
    pub memory_unavailable: bool,
    pub phase: RowPhase,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem {
    Banner { text: String },
    Row(RowView),
    Placeholder { text: String },
    Error { text: String },
}

/// Retained model of the popup's list area.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListContainer {
    #[serde(skip)]
    next_row: u64,
    items: Vec<ListItem>,
}

impl ListContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push_banner(&mut self, text: impl Into<String>) {
        self.items.push(ListItem::Banner { text: text.into() });
    }

    pub fn push_placeholder(&mut self, text: impl Into<String>) {
        self.items.push(ListItem::Placeholder { text: text.into() });
    }

    /// Replaces everything in the container with a single error item.
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.items.clear();
        self.items.push(ListItem::Error { text: text.into() });
    }

    /// Appends a row built by `build` from a freshly allocated id.
    pub fn push_row<F>(&mut self, build: F) -> RowId
    where
        F: FnOnce(RowId) -> RowView,
    {
        self.next_row += 1;
        let id = RowId::new(self.next_row);
        self.items.push(ListItem::Row(build(id)));
        id
    }

    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.items.iter().filter_map(|item| match item {
            ListItem::Row(row) => Some(row),
            _ => None,
        })
    }

    pub fn row(&self, id: RowId) -> Option<&RowView> {
        self.rows().find(|row| row.id == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut RowView> {
        self.items.iter_mut().find_map(|item| match item {
            ListItem::Row(row) if row.id == id => Some(row),
            _ => None,
        })
    }

    pub fn has_banner(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, ListItem::Banner { .. }))
    }

    /// Marks a row as fading out. Returns `false` if the row is gone.
    pub fn fade_row(&mut self, id: RowId, opacity: f32) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        row.phase = RowPhase::Fading;
        row.opacity = opacity;
        true
    }

    /// Removes a row. Returns `false` if it was already removed.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| !matches!(item, ListItem::Row(row) if row.id == id));
        self.items.len() != before
    }
}

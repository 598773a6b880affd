use memory::format_mb;
use serde::Serialize;
use tabs::TabId;
use ui::{ListContainer, RowId, RowPhase, RowView};

use crate::record::DisplayRecord;

pub const EMPTY_PLACEHOLDER: &str = "No tabs found.";
pub const UNTITLED: &str = "Untitled";
pub const SHARED_SUFFIX: &str = " (Shared Process)";
pub const NO_PROCESS: &str = "-";
pub const MEMORY_UNAVAILABLE: &str = "N/A";

/// Close action bound to a rendered row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CloseBinding {
    pub tab: TabId,
    pub row: RowId,
}

/// Renders `records` into `container` in the given order.
///
/// Prior content is cleared, unless the caller already inserted the
/// degraded-mode banner, in which case rows are appended after it.
pub fn render_records(
    records: &[DisplayRecord],
    container: &mut ListContainer,
) -> Vec<CloseBinding> {
    if !container.has_banner() {
        container.clear();
    }

    if records.is_empty() {
        container.push_placeholder(EMPTY_PLACEHOLDER);
        return Vec::new();
    }

    records
        .iter()
        .map(|record| {
            let row = container.push_row(|id| row_view(id, record));
            CloseBinding {
                tab: record.tab.id,
                row,
            }
        })
        .collect()
}

fn row_view(id: RowId, record: &DisplayRecord) -> RowView {
    let title = record
        .tab
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let domain = if record.shared {
        format!("{}{}", record.domain, SHARED_SUFFIX)
    } else {
        record.domain.clone()
    };

    let process = record
        .process_id
        .map(|pid| pid.to_string())
        .unwrap_or_else(|| NO_PROCESS.to_string());

    let memory = if record.error {
        MEMORY_UNAVAILABLE.to_string()
    } else {
        format_mb(record.memory)
    };

    RowView {
        id,
        tab: record.tab.id,
        tooltip: title.clone(),
        title,
        domain,
        process,
        memory,
        memory_unavailable: record.error,
        phase: RowPhase::Rendered,
        opacity: 1.0,
    }
}

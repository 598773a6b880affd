use std::fmt;

use memory::{format_mb_rounded, ProcessId, SystemMemoryInfo};
use tabs::Tab;

/// What the popup shows for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub tab: Tab,
    pub process_id: Option<ProcessId>,
    /// Private memory of the owning process in bytes, 0 when unknown.
    pub memory: u64,
    /// Another tab in the same load resolved to the same process.
    pub shared: bool,
    pub domain: String,
    /// Memory could not be determined for this tab.
    pub error: bool,
}

impl DisplayRecord {
    /// Record for a tab whose memory is unavailable.
    pub fn unmeasured(tab: Tab) -> Self {
        let domain = tab.domain();
        Self {
            tab,
            process_id: None,
            memory: 0,
            shared: false,
            domain,
            error: true,
        }
    }
}

/// Headline memory figure for the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemorySummary {
    /// Sum of private memory over the unique processes hosting tabs.
    TabTotal { bytes: u64 },
    System(SystemMemoryInfo),
    Unavailable,
}

impl MemorySummary {
    /// The tab total in whole MB, e.g. `"150 MB"`.
    pub fn total_label(&self) -> Option<String> {
        match self {
            Self::TabTotal { bytes } => Some(format_mb_rounded(*bytes)),
            Self::System(_) | Self::Unavailable => None,
        }
    }
}

impl fmt::Display for MemorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabTotal { bytes } => write!(f, "Est. Memory: {}", format_mb_rounded(*bytes)),
            Self::System(info) => write!(
                f,
                "System Memory: {} / {}",
                format_mb_rounded(info.used()),
                format_mb_rounded(info.capacity)
            ),
            Self::Unavailable => f.write_str("Memory API Unavailable"),
        }
    }
}

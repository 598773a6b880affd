//! Joins tabs with process memory into display records.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use memory::{ProcessHost, ProcessId, SystemMemorySource};
use tabs::Tab;
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{DisplayRecord, MemorySummary};

/// Records ready for rendering plus the headline memory figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub records: Vec<DisplayRecord>,
    pub summary: MemorySummary,
}

/// Builds records without per-process data. Order follows `tabs`.
///
/// The optional system memory read only affects the summary; its absence or
/// failure never fails the aggregation.
pub async fn aggregate_degraded(
    tabs: Vec<Tab>,
    system: Option<&dyn SystemMemorySource>,
) -> Aggregation {
    let records = tabs.into_iter().map(DisplayRecord::unmeasured).collect();

    let summary = match system {
        Some(source) => match source.read_info().await {
            Ok(info) => MemorySummary::System(info),
            Err(err) => {
                warn!(error = %err, "system memory read failed");
                MemorySummary::Unavailable
            }
        },
        None => MemorySummary::Unavailable,
    };

    Aggregation { records, summary }
}

/// Builds records with per-process memory, sorted by memory descending.
///
/// Process ids are resolved concurrently; a tab whose resolution fails keeps
/// its place with unknown memory. Memory for all resolved processes is fetched
/// in one batched lookup, whose failure is returned to the caller.
pub async fn aggregate_per_process(
    tabs: Vec<Tab>,
    processes: &dyn ProcessHost,
) -> Result<Aggregation> {
    let resolved: Vec<(Tab, Option<ProcessId>)> =
        join_all(tabs.into_iter().map(|tab| async move {
            match processes.process_id_for_tab(tab.id).await {
                Ok(pid) => (tab, Some(pid)),
                Err(err) => {
                    warn!(tab = %tab.id, error = %err, "could not get process for tab");
                    (tab, None)
                }
            }
        }))
        .await;

    let mut seen = HashSet::new();
    let mut tabs_per_process: HashMap<ProcessId, usize> = HashMap::new();
    let mut unique = Vec::new();
    for pid in resolved.iter().filter_map(|(_, pid)| *pid) {
        *tabs_per_process.entry(pid).or_default() += 1;
        if seen.insert(pid) {
            unique.push(pid);
        }
    }

    let info = if unique.is_empty() {
        HashMap::new()
    } else {
        processes.process_info(&unique).await?
    };
    debug!(
        tabs = resolved.len(),
        processes = unique.len(),
        reported = info.len(),
        "process lookup complete"
    );

    let mut records: Vec<DisplayRecord> = resolved
        .into_iter()
        .map(|(tab, process_id)| {
            let private_memory = process_id
                .and_then(|pid| info.get(&pid))
                .map(|proc_info| proc_info.private_memory);
            let shared = process_id
                .and_then(|pid| tabs_per_process.get(&pid))
                .is_some_and(|count| *count > 1);
            let domain = tab.domain();

            DisplayRecord {
                tab,
                process_id,
                memory: private_memory.unwrap_or(0),
                shared,
                domain,
                error: private_memory.is_none(),
            }
        })
        .collect();

    // Stable: equal memory keeps enumeration order.
    records.sort_by(|a, b| b.memory.cmp(&a.memory));

    let bytes = unique
        .iter()
        .filter_map(|pid| info.get(pid))
        .map(|proc_info| proc_info.private_memory)
        .fold(0u64, u64::saturating_add);

    Ok(Aggregation {
        records,
        summary: MemorySummary::TabTotal { bytes },
    })
}

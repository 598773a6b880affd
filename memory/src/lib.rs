use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tabs::TabId;
use thiserror::Error;

pub mod format;
pub mod procfs;

pub use format::{bytes_to_mb, format_mb, format_mb_rounded};
pub use procfs::{MemInfoSource, ProcMemorySource};

/// Operating system process id as reported by the host.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a single process's memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub private_memory: u64,
}

/// Result of a batched process lookup. Ids the host could not report on are
/// simply absent.
pub type ProcessMap = HashMap<ProcessId, ProcessInfo>;

/// Coarse system-wide memory reading, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMemoryInfo {
    pub capacity: u64,
    pub available_capacity: u64,
}

impl SystemMemoryInfo {
    pub fn used(&self) -> u64 {
        self.capacity.saturating_sub(self.available_capacity)
    }
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("could not resolve process for tab {tab}: {reason}")]
    Resolve { tab: TabId, reason: String },

    #[error("process lookup failed: {0}")]
    Lookup(String),

    #[error("system memory read failed: {0}")]
    SystemRead(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Batched per-process memory lookup.
#[async_trait(?Send)]
pub trait ProcessInfoSource {
    /// Returns memory details for the requested processes in one request.
    async fn process_info(&self, ids: &[ProcessId]) -> Result<ProcessMap, MemoryError>;
}

/// Per-process memory introspection offered by the host.
///
/// Presence of this capability selects the full aggregation path.
#[async_trait(?Send)]
pub trait ProcessHost: ProcessInfoSource {
    /// Resolves the process that owns a tab.
    async fn process_id_for_tab(&self, tab: TabId) -> Result<ProcessId, MemoryError>;
}

/// Maps a tab to the process rendering it, without memory introspection.
#[async_trait(?Send)]
pub trait ProcessResolver {
    async fn process_id_for_tab(&self, tab: TabId) -> Result<ProcessId, MemoryError>;
}

/// [`ProcessHost`] assembled from a host resolver and a separate memory
/// lookup, e.g. a browser's tab-to-pid mapping plus [`ProcMemorySource`].
#[derive(Debug, Clone)]
pub struct PairedProcessHost<R, S> {
    resolver: R,
    source: S,
}

impl<R, S> PairedProcessHost<R, S> {
    pub fn new(resolver: R, source: S) -> Self {
        Self { resolver, source }
    }
}

#[async_trait(?Send)]
impl<R, S> ProcessInfoSource for PairedProcessHost<R, S>
where
    R: ProcessResolver,
    S: ProcessInfoSource,
{
    async fn process_info(&self, ids: &[ProcessId]) -> Result<ProcessMap, MemoryError> {
        self.source.process_info(ids).await
    }
}

#[async_trait(?Send)]
impl<R, S> ProcessHost for PairedProcessHost<R, S>
where
    R: ProcessResolver,
    S: ProcessInfoSource,
{
    async fn process_id_for_tab(&self, tab: TabId) -> Result<ProcessId, MemoryError> {
        self.resolver.process_id_for_tab(tab).await
    }
}

/// Optional coarse system memory read.
#[async_trait(?Send)]
pub trait SystemMemorySource {
    async fn read_info(&self) -> Result<SystemMemoryInfo, MemoryError>;
}

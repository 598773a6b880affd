use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    MemoryError, ProcessId, ProcessInfo, ProcessInfoSource, ProcessMap, SystemMemoryInfo,
    SystemMemorySource,
};

/// System memory read backed by `/proc/meminfo`.
///
/// Capacity is `MemTotal`, available capacity is `MemAvailable`.
#[derive(Debug, Clone)]
pub struct MemInfoSource {
    path: PathBuf,
}

impl MemInfoSource {
    pub fn new() -> Self {
        Self::with_path("/proc/meminfo")
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for MemInfoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl SystemMemorySource for MemInfoSource {
    async fn read_info(&self) -> Result<SystemMemoryInfo, MemoryError> {
        let bytes = fs::read(&self.path)?;
        parse_meminfo(&bytes).ok_or_else(|| {
            MemoryError::SystemRead(format!(
                "missing MemTotal or MemAvailable in {}",
                self.path.display()
            ))
        })
    }
}

/// Per-process private memory read from `/proc/<pid>/smaps_rollup`.
///
/// Private memory is `Private_Clean + Private_Dirty`. Processes that exited or
/// cannot be inspected are left out of the result.
#[derive(Debug, Clone)]
pub struct ProcMemorySource {
    root: PathBuf,
}

impl ProcMemorySource {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_private_memory(&self, pid: ProcessId) -> Option<u64> {
        let path = self.root.join(pid.to_string()).join("smaps_rollup");
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(%pid, error = %err, "skipping unreadable process");
                return None;
            }
        };
        parse_private_memory(&bytes)
    }
}

impl Default for ProcMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ProcessInfoSource for ProcMemorySource {
    async fn process_info(&self, ids: &[ProcessId]) -> Result<ProcessMap, MemoryError> {
        if !self.root.is_dir() {
            return Err(MemoryError::Lookup(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let map = ids
            .iter()
            .filter_map(|pid| {
                self.read_private_memory(*pid)
                    .map(|private_memory| (*pid, ProcessInfo { private_memory }))
            })
            .collect();
        Ok(map)
    }
}

fn parse_meminfo(bytes: &[u8]) -> Option<SystemMemoryInfo> {
    let mut total: Option<u64> = None;
    let mut available: Option<u64> = None;

    for line in bytes.split(|b| *b == b'\n') {
        if total.is_none() && line.starts_with(b"MemTotal:") {
            total = parse_kb_value(line).map(|v| v.saturating_mul(1024));
        } else if available.is_none() && line.starts_with(b"MemAvailable:") {
            available = parse_kb_value(line).map(|v| v.saturating_mul(1024));
        }

        if total.is_some() && available.is_some() {
            break;
        }
    }

    Some(SystemMemoryInfo {
        capacity: total?,
        available_capacity: available?,
    })
}

fn parse_private_memory(bytes: &[u8]) -> Option<u64> {
    let mut clean: Option<u64> = None;
    let mut dirty: Option<u64> = None;

    for line in bytes.split(|b| *b == b'\n') {
        if line.starts_with(b"Private_Clean:") {
            clean = parse_kb_value(line);
        } else if line.starts_with(b"Private_Dirty:") {
            dirty = parse_kb_value(line);
        }
    }

    if clean.is_none() && dirty.is_none() {
        return None;
    }
    let kb = clean.unwrap_or(0).saturating_add(dirty.unwrap_or(0));
    Some(kb.saturating_mul(1024))
}

fn parse_kb_value(line: &[u8]) -> Option<u64> {
    let mut value: u64 = 0;
    let mut saw_digit = false;
    for byte in line.iter().copied() {
        if byte.is_ascii_digit() {
            saw_digit = true;
            value = value
                .saturating_mul(10)
                .saturating_add((byte - b'0') as u64);
        } else if saw_digit {
            break;
        }
    }
    if saw_digit {
        Some(value)
    } else {
        None
    }
}

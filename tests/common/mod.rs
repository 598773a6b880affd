#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use tabmem::memory::{
    MemoryError, ProcessHost, ProcessId, ProcessInfo, ProcessInfoSource, ProcessMap,
    ProcessResolver, SystemMemoryInfo, SystemMemorySource,
};
use tabmem::tabs::{CloseOutcome, Tab, TabError, TabHost, TabId};
use tabmem::ui::{QueuedUiBridge, RowView};
use tabmem::{HostCapabilities, Popup, PopupConfig};

pub const MB: u64 = 1024 * 1024;

/// In-memory browser standing in for the extension APIs.
#[derive(Default)]
pub struct FakeBrowser {
    pub tabs: RefCell<Vec<Tab>>,
    pub owners: HashMap<TabId, ProcessId>,
    pub memory: ProcessMap,
    pub fail_query: bool,
    pub fail_lookup: bool,
    pub fail_close: HashSet<TabId>,
    pub closed: RefCell<Vec<TabId>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(self, id: u64, title: &str, url: &str) -> Self {
        self.tabs.borrow_mut().push(Tab::new(id, title, url));
        self
    }

    pub fn owner(mut self, tab: u64, pid: u32) -> Self {
        self.owners.insert(TabId::new(tab), ProcessId::new(pid));
        self
    }

    pub fn memory(mut self, pid: u32, bytes: u64) -> Self {
        self.memory.insert(
            ProcessId::new(pid),
            ProcessInfo {
                private_memory: bytes,
            },
        );
        self
    }

    pub fn failing_close(mut self, tab: u64) -> Self {
        self.fail_close.insert(TabId::new(tab));
        self
    }
}

#[async_trait(?Send)]
impl TabHost for FakeBrowser {
    async fn query_tabs(&self) -> Result<Vec<Tab>, TabError> {
        if self.fail_query {
            return Err(TabError::Query("tabs permission missing".to_string()));
        }
        Ok(self.tabs.borrow().clone())
    }

    async fn close_tab(&self, id: TabId) -> CloseOutcome {
        if self.fail_close.contains(&id) {
            return CloseOutcome::failed(format!("No tab with id: {id}."));
        }
        self.tabs.borrow_mut().retain(|tab| tab.id != id);
        self.closed.borrow_mut().push(id);
        CloseOutcome::Closed
    }
}

#[async_trait(?Send)]
impl ProcessInfoSource for FakeBrowser {
    async fn process_info(&self, ids: &[ProcessId]) -> Result<ProcessMap, MemoryError> {
        if self.fail_lookup {
            return Err(MemoryError::Lookup("process API disconnected".to_string()));
        }
        Ok(ids
            .iter()
            .filter_map(|pid| self.memory.get(pid).map(|info| (*pid, *info)))
            .collect())
    }
}

#[async_trait(?Send)]
impl ProcessHost for FakeBrowser {
    async fn process_id_for_tab(&self, tab: TabId) -> Result<ProcessId, MemoryError> {
        self.owners.get(&tab).copied().ok_or(MemoryError::Resolve {
            tab,
            reason: "tab is not backed by a renderer".to_string(),
        })
    }
}

/// Tab-to-pid mapping without memory introspection of its own.
#[derive(Default)]
pub struct OwnerTable(pub HashMap<TabId, ProcessId>);

impl OwnerTable {
    pub fn owner(mut self, tab: u64, pid: u32) -> Self {
        self.0.insert(TabId::new(tab), ProcessId::new(pid));
        self
    }
}

#[async_trait(?Send)]
impl ProcessResolver for OwnerTable {
    async fn process_id_for_tab(&self, tab: TabId) -> Result<ProcessId, MemoryError> {
        self.0.get(&tab).copied().ok_or(MemoryError::Resolve {
            tab,
            reason: "tab is not backed by a renderer".to_string(),
        })
    }
}

pub struct FixedSystemMemory(pub SystemMemoryInfo);

#[async_trait(?Send)]
impl SystemMemorySource for FixedSystemMemory {
    async fn read_info(&self) -> Result<SystemMemoryInfo, MemoryError> {
        Ok(self.0)
    }
}

pub struct Harness {
    pub browser: Rc<FakeBrowser>,
    pub bridge: Rc<QueuedUiBridge>,
    pub popup: Popup,
}

impl Harness {
    /// Popup with per-process memory available.
    pub fn full(browser: FakeBrowser) -> Self {
        let browser = Rc::new(browser);
        let host = HostCapabilities::new(browser.clone()).with_processes(browser.clone());
        Self::with_host(browser, host)
    }

    /// Popup whose per-process memory comes from `processes` instead of the
    /// fake browser.
    pub fn with_process_host(browser: FakeBrowser, processes: Rc<dyn ProcessHost>) -> Self {
        let browser = Rc::new(browser);
        let host = HostCapabilities::new(browser.clone()).with_processes(processes);
        Self::with_host(browser, host)
    }

    /// Popup without per-process memory.
    pub fn degraded(browser: FakeBrowser, system: Option<SystemMemoryInfo>) -> Self {
        let browser = Rc::new(browser);
        let mut host = HostCapabilities::new(browser.clone());
        if let Some(info) = system {
            host = host.with_system_memory(Rc::new(FixedSystemMemory(info)));
        }
        Self::with_host(browser, host)
    }

    fn with_host(browser: Rc<FakeBrowser>, host: HostCapabilities) -> Self {
        let bridge = Rc::new(QueuedUiBridge::new());
        let popup = Popup::new(host, PopupConfig::default(), bridge.clone());
        Self {
            browser,
            bridge,
            popup,
        }
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.popup.state().list.rows().cloned().collect()
    }

    pub fn row_for_tab(&self, tab: u64) -> RowView {
        self.rows()
            .into_iter()
            .find(|row| row.tab == TabId::new(tab))
            .expect("row for tab")
    }
}

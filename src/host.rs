use std::rc::Rc;

use memory::{ProcessHost, SystemMemorySource};
use tabs::TabHost;

/// Capabilities the host environment exposes to the popup.
///
/// Tab listing is mandatory; per-process introspection and the coarse system
/// memory read are optional.
#[derive(Clone)]
pub struct HostCapabilities {
    pub tabs: Rc<dyn TabHost>,
    pub processes: Option<Rc<dyn ProcessHost>>,
    pub system_memory: Option<Rc<dyn SystemMemorySource>>,
}

impl HostCapabilities {
    pub fn new(tabs: Rc<dyn TabHost>) -> Self {
        Self {
            tabs,
            processes: None,
            system_memory: None,
        }
    }

    pub fn with_processes(mut self, processes: Rc<dyn ProcessHost>) -> Self {
        self.processes = Some(processes);
        self
    }

    pub fn with_system_memory(mut self, source: Rc<dyn SystemMemorySource>) -> Self {
        self.system_memory = Some(source);
        self
    }
}

/// Which aggregation path a load takes. There is no mixed mode.
#[derive(Clone, Copy)]
pub enum MemoryMode<'a> {
    PerProcess(&'a dyn ProcessHost),
    Degraded {
        system_memory: Option<&'a dyn SystemMemorySource>,
    },
}

impl MemoryMode<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PerProcess(_) => "per-process",
            Self::Degraded { .. } => "degraded",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

impl HostCapabilities {
    /// Checks once whether per-process memory introspection is available.
    pub fn probe(&self) -> MemoryMode<'_> {
        match self.processes.as_deref() {
            Some(processes) => MemoryMode::PerProcess(processes),
            None => MemoryMode::Degraded {
                system_memory: self.system_memory.as_deref(),
            },
        }
    }
}

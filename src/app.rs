use std::cell::RefCell;
use std::rc::Rc;

use tabs::CloseOutcome;
use tracing::{debug, error, info};
use ui::{RowId, UiBridge, UiMessage};

use crate::aggregate::{aggregate_degraded, aggregate_per_process, Aggregation};
use crate::closer;
use crate::config::PopupConfig;
use crate::error::Result;
use crate::host::{HostCapabilities, MemoryMode};
use crate::ipc::{self, IncomingMessage};
use crate::render::render_records;
use crate::state::PopupState;

/// The popup core: gathers tab and process data, renders it, and reacts to
/// close requests from the view.
pub struct Popup {
    host: HostCapabilities,
    config: PopupConfig,
    bridge: Rc<dyn UiBridge>,
    state: RefCell<PopupState>,
}

impl Popup {
    pub fn new(host: HostCapabilities, config: PopupConfig, bridge: Rc<dyn UiBridge>) -> Self {
        Self {
            host,
            config,
            bridge,
            state: RefCell::new(PopupState::new()),
        }
    }

    pub fn state(&self) -> std::cell::Ref<'_, PopupState> {
        self.state.borrow()
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Runs one full load and publishes the result.
    ///
    /// A top-level failure replaces the list with a single error item instead
    /// of propagating.
    pub async fn load(&self) {
        self.state.borrow_mut().reset_list();

        if let Err(err) = self.gather_and_render().await {
            error!(error = %err, "error analyzing tabs");
            self.state.borrow_mut().show_error(&err.to_string());
        }

        ipc::send_state(self.bridge.as_ref(), &self.state.borrow());
    }

    async fn gather_and_render(&self) -> Result<()> {
        let tabs = self.host.tabs.query_tabs().await?;
        let tab_count = tabs.len();
        self.state.borrow_mut().total_tabs.set_text(tab_count.to_string());

        let mode = self.host.probe();
        debug!(tabs = tab_count, mode = mode.name(), "gathering tab memory");

        let Aggregation { records, summary } = match mode {
            MemoryMode::PerProcess(processes) => aggregate_per_process(tabs, processes).await?,
            MemoryMode::Degraded { system_memory } => {
                self.state
                    .borrow_mut()
                    .list
                    .push_banner(self.config.api_warning.as_str());
                aggregate_degraded(tabs, system_memory).await
            }
        };

        let mut state = self.state.borrow_mut();
        let bindings = render_records(&records, &mut state.list);
        state.bindings = bindings;
        state.total_memory.set_text(summary.to_string());
        info!(tabs = tab_count, summary = %summary, "popup rendered");
        Ok(())
    }

    /// Closes the tab shown in `row`. Unknown rows are ignored.
    pub async fn close_row(&self, row: RowId) -> Option<CloseOutcome> {
        let Some(binding) = self.state.borrow().binding(row) else {
            debug!(%row, "close requested for unknown row");
            return None;
        };

        let outcome = closer::close_tab(
            self.host.tabs.as_ref(),
            binding.tab,
            binding.row,
            &self.state,
            &self.config,
            self.bridge.as_ref(),
        )
        .await;
        Some(outcome)
    }

    /// Dispatches a message from the popup view.
    pub async fn handle_message(&self, message: &UiMessage) {
        match IncomingMessage::parse(message) {
            Some(IncomingMessage::Ready) => {
                ipc::send_state(self.bridge.as_ref(), &self.state.borrow());
            }
            Some(IncomingMessage::CloseRow { row }) => {
                self.close_row(row).await;
            }
            None => {}
        }
    }
}

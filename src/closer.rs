use std::cell::RefCell;

use tabs::{CloseOutcome, TabHost, TabId};
use tracing::{debug, error};
use ui::{RowId, UiBridge};

use crate::config::PopupConfig;
use crate::ipc;
use crate::state::PopupState;

/// Closes `tab` and retires its row.
///
/// On failure the row and the tab counter are left as they were. On success
/// the row fades, the counter drops by one, and the row is removed once
/// `removal_delay` has elapsed. The state is pushed to `bridge` after each
/// visible change.
pub async fn close_tab(
    tabs: &dyn TabHost,
    tab: TabId,
    row: RowId,
    state: &RefCell<PopupState>,
    config: &PopupConfig,
    bridge: &dyn UiBridge,
) -> CloseOutcome {
    let outcome = tabs.close_tab(tab).await;
    if let CloseOutcome::Failed { reason } = &outcome {
        error!(%tab, %reason, "failed to close tab");
        return outcome;
    }

    {
        let mut state = state.borrow_mut();
        state.list.fade_row(row, config.faded_opacity);
        state.forget_row(row);
        state.total_tabs.decrement_count();
        ipc::send_state(bridge, &state);
    }

    tokio::time::sleep(config.removal_delay()).await;

    let mut state = state.borrow_mut();
    if state.list.remove_row(row) {
        debug!(%tab, %row, "row removed");
        ipc::send_state(bridge, &state);
    }
    outcome
}

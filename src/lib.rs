//! Popup core that lists open tabs with the private memory of their owning
//! process, flags tabs sharing a process, and closes tabs on request.
//!
//! The host environment is reached only through the capability traits in
//! [`tabs`] and [`memory`]; the popup view is driven through [`ui::UiBridge`].

pub mod aggregate;
pub mod app;
pub mod closer;
pub mod config;
pub mod error;
pub mod host;
pub mod ipc;
pub mod logging;
pub mod record;
pub mod render;
pub mod state;

pub use app::Popup;
pub use config::PopupConfig;
pub use error::{Error, Result};
pub use host::{HostCapabilities, MemoryMode};
pub use record::{DisplayRecord, MemorySummary};

pub use memory;
pub use tabs;
pub use ui;

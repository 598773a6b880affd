use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod domain;

pub use domain::{extract_domain, FALLBACK_DOMAIN};

/// Stable identifier the host assigns to an open tab.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    /// Creates a new `TabId` from a raw numeric value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of a tab as reported by the host.
///
/// Title and URL are optional because privileged or still-loading tabs may
/// not expose them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Tab {
    pub fn new(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: TabId::new(id),
            title: Some(title.into()),
            url: Some(url.into()),
        }
    }

    /// Display domain for this tab's URL.
    pub fn domain(&self) -> String {
        extract_domain(self.url.as_deref().unwrap_or_default())
    }
}

/// Errors raised by a tab host.
#[derive(Debug, Error)]
pub enum TabError {
    #[error("tab enumeration failed: {0}")]
    Query(String),

    #[error("tab {0} not found")]
    NotFound(TabId),
}

/// Result of asking the host to close a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Failed { reason: String },
}

impl CloseOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Tab capabilities provided by the host environment.
#[async_trait(?Send)]
pub trait TabHost {
    /// Returns every currently open tab, in the host's enumeration order.
    async fn query_tabs(&self) -> Result<Vec<Tab>, TabError>;

    /// Asks the host to close a tab. Failures are reported in the outcome,
    /// never as a panic or a dropped request.
    async fn close_tab(&self, id: TabId) -> CloseOutcome;
}

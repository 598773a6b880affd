use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

const DEFAULT_API_WARNING: &str = "Per-process memory introspection is not available in this \
browser (it may require a development channel or an experimental flag). Memory usage per tab \
cannot be retrieved.";

/// Popup behaviour settings.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopupConfig {
    /// Delay between a row starting to fade and its removal.
    pub removal_delay_ms: u64,
    /// Opacity applied to a row while it fades out.
    pub faded_opacity: f32,
    /// Banner shown when per-process memory is unavailable.
    pub api_warning: String,
    /// `tracing` filter directive used by [`crate::logging::init_logging`].
    pub log_level: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            removal_delay_ms: 300,
            faded_opacity: 0.5,
            api_warning: DEFAULT_API_WARNING.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PopupConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.faded_opacity) {
            return Err(Error::Config(format!(
                "faded_opacity must be within 0.0..=1.0, got {}",
                self.faded_opacity
            )));
        }
        Ok(())
    }
}

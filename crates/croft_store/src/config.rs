//! Device-local configuration.

use croft_model::Timestamp;
use serde::{Deserialize, Serialize};

/// Configuration persisted per device, outside the synced document.
///
/// Holds the active sync endpoint locator and the last-sync stamp the local
/// dataset is known to reflect. Neither value ever travels inside the
/// snapshot itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Locator of the active sync endpoint, if one is configured.
    #[serde(default)]
    pub sync_network_path: Option<String>,
    /// Stamp of the snapshot the local dataset last reflected.
    #[serde(default)]
    pub last_sync: Option<Timestamp>,
}

impl DeviceConfig {
    /// Returns true if a sync endpoint is configured.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.sync_network_path.is_some()
    }
}

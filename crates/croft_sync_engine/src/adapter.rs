//! Store-backed sync accessor.
//!
//! Wires the on-disk [`croft_store::Store`] into the engine's
//! [`SyncStore`] seam. Endpoint and last-sync live in the device
//! configuration, never inside the synced snapshot.

use crate::error::SyncResult;
use crate::state::SyncStore;
use croft_model::{Dataset, Timestamp};
use croft_store::Store;

impl SyncStore for Store {
    fn snapshot(&self) -> Dataset {
        self.dataset()
    }

    fn adopt(&self, dataset: Dataset) -> SyncResult<()> {
        self.replace_dataset(dataset)?;
        Ok(())
    }

    fn endpoint(&self) -> Option<String> {
        self.config().sync_network_path
    }

    fn set_endpoint(&self, locator: &str) -> SyncResult<()> {
        self.set_sync_path(locator)?;
        Ok(())
    }

    fn clear_endpoint(&self) -> SyncResult<()> {
        self.clear_sync_path()?;
        Ok(())
    }

    fn last_sync(&self) -> Option<Timestamp> {
        self.config().last_sync
    }

    fn set_last_sync(&self, stamp: &Timestamp) -> SyncResult<()> {
        croft_store::Store::set_last_sync(self, stamp)?;
        Ok(())
    }
}

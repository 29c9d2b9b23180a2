//! The device-local store.

use crate::config::DeviceConfig;
use crate::dir::StoreDir;
use crate::error::StoreResult;
use croft_model::{Dataset, Timestamp};
use parking_lot::RwLock;
use std::path::Path;
use tracing::debug;

/// The persisted key-value dataset plus device configuration.
///
/// Loads both files into memory on open; every mutation persists before the
/// in-memory copy is updated, so readers never observe state that is not on
/// disk. The dataset is replaced only wholesale; the surrounding
/// application edits records in memory and the sync engine adopts entire
/// snapshots, so there is no per-record mutation surface here.
///
/// # Thread Safety
///
/// The store is `Send + Sync`; interior locks guard the in-memory copies.
pub struct Store {
    dir: StoreDir,
    dataset: RwLock<Dataset>,
    config: RwLock<DeviceConfig>,
}

impl Store {
    /// Opens or creates a store at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or locked, or if
    /// a persisted file exists but fails to decode.
    pub fn open(path: &Path, create_if_missing: bool) -> StoreResult<Self> {
        let dir = StoreDir::open(path, create_if_missing)?;

        let dataset = match dir.load(&dir.dataset_path())? {
            Some(content) => serde_json::from_str(&content)?,
            None => Dataset::default(),
        };

        let config = match dir.load(&dir.device_path())? {
            Some(content) => serde_json::from_str(&content)?,
            None => DeviceConfig::default(),
        };

        debug!(path = %path.display(), records = dataset.record_count(), "store opened");

        Ok(Self {
            dir,
            dataset: RwLock::new(dataset),
            config: RwLock::new(config),
        })
    }

    /// Returns the store directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns a copy of the current dataset.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        self.dataset.read().clone()
    }

    /// Replaces the dataset wholesale and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be written; the in-memory
    /// copy is left unchanged in that case.
    pub fn replace_dataset(&self, dataset: Dataset) -> StoreResult<()> {
        let content = serde_json::to_string(&dataset)?;
        self.dir.save(&self.dir.dataset_path(), &content)?;
        *self.dataset.write() = dataset;
        Ok(())
    }

    /// Returns a copy of the device configuration.
    #[must_use]
    pub fn config(&self) -> DeviceConfig {
        self.config.read().clone()
    }

    /// Sets the sync endpoint locator.
    pub fn set_sync_path(&self, locator: &str) -> StoreResult<()> {
        self.update_config(|config| config.sync_network_path = Some(locator.to_string()))
    }

    /// Clears the sync endpoint locator. Idempotent.
    pub fn clear_sync_path(&self) -> StoreResult<()> {
        self.update_config(|config| config.sync_network_path = None)
    }

    /// Records the stamp of the snapshot the dataset now reflects.
    pub fn set_last_sync(&self, stamp: &Timestamp) -> StoreResult<()> {
        self.update_config(|config| config.last_sync = Some(stamp.clone()))
    }

    /// Applies a configuration edit and persists it.
    fn update_config(&self, edit: impl FnOnce(&mut DeviceConfig)) -> StoreResult<()> {
        let mut updated = self.config.read().clone();
        edit(&mut updated);

        let content = serde_json::to_string(&updated)?;
        self.dir.save(&self.dir.device_path(), &content)?;
        *self.config.write() = updated;
        Ok(())
    }
}

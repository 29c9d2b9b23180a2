//! Store directory management.
//!
//! This module handles the file system layout for a Croft store:
//!
//! ```text
//! <store_path>/
//! ├─ LOCK            # Advisory lock for single-process access
//! ├─ dataset.json    # The persisted dataset
//! └─ device.json     # Device-local configuration (never synced)
//! ```
//!
//! The LOCK file ensures only one process opens the store at a time. Both
//! JSON files are replaced atomically (write temp, rename) so a crash never
//! leaves a half-written file behind.

use crate::error::{StoreError, StoreResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File names within the store directory.
const LOCK_FILE: &str = "LOCK";
const DATASET_FILE: &str = "dataset.json";
const DEVICE_FILE: &str = "device.json";
/// Suffix for temporary files used in atomic replacement.
const TEMP_SUFFIX: &str = ".tmp";

/// Manages the store directory structure and file locking.
///
/// Only one `StoreDir` instance can exist per directory at a time; the
/// advisory lock is held for the lifetime of the value.
#[derive(Debug)]
pub struct StoreDir {
    /// Root directory path.
    path: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
}

impl StoreDir {
    /// Opens or creates a store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory doesn't exist and `create_if_missing` is false
    /// - Another process holds the lock (returns `Locked`)
    /// - I/O errors occur
    pub fn open(path: &Path, create_if_missing: bool) -> StoreResult<Self> {
        if !path.exists() {
            if create_if_missing {
                fs::create_dir_all(path)?;
            } else {
                return Err(StoreError::invalid_layout(format!(
                    "store directory does not exist: {}",
                    path.display()
                )));
            }
        }

        if !path.is_dir() {
            return Err(StoreError::invalid_layout(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        let lock_path = path.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked);
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the path to the store directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the dataset file.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.path.join(DATASET_FILE)
    }

    /// Returns the path to the device configuration file.
    #[must_use]
    pub fn device_path(&self) -> PathBuf {
        self.path.join(DEVICE_FILE)
    }

    /// Reads a file, returning `None` if it doesn't exist or is empty.
    pub fn load(&self, path: &Path) -> StoreResult<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Saves a file atomically.
    ///
    /// Uses write-then-rename for crash safety:
    /// 1. Write to a temporary file next to the target
    /// 2. Sync the temporary file to disk
    /// 3. Rename it over the target
    /// 4. Fsync the directory so the rename is durable
    pub fn save(&self, path: &Path, content: &str) -> StoreResult<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| StoreError::invalid_layout("save target has no file name"))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = self.path.join(temp_name);

        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;
        self.sync_directory()?;

        Ok(())
    }

    /// Syncs the store directory so metadata updates are durable.
    ///
    /// On Windows, NTFS journaling covers metadata durability, so the
    /// explicit fsync is skipped.
    #[cfg(unix)]
    fn sync_directory(&self) -> StoreResult<()> {
        let dir = File::open(&self.path)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StoreResult<()> {
        Ok(())
    }
}

//! Remote file transport abstraction.

use crate::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A remote file transport performs byte-level I/O against the sync
/// endpoint: one JSON blob at a configured locator.
///
/// This trait abstracts the storage layer, allowing different
/// implementations (a mounted share, an in-memory mock for testing).
/// The engine never interprets the locator; it passes through whatever
/// was configured.
pub trait RemoteTransport: Send + Sync {
    /// Probes whether the locator can be read and written.
    fn probe(&self, locator: &str) -> SyncResult<()>;

    /// Reads the remote blob.
    ///
    /// Returns `Ok(None)` if nothing has ever been written at the locator;
    /// hard failures (unreachable share, permission denied) are errors.
    fn read(&self, locator: &str) -> SyncResult<Option<String>>;

    /// Replaces the remote blob wholesale.
    fn write(&self, locator: &str, content: &str) -> SyncResult<()>;
}

/// A mock transport for testing.
///
/// Holds the remote blob in memory and supports scripted failure
/// injection per operation.
#[derive(Debug, Default)]
pub struct MockTransport {
    reachable: AtomicBool,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    remote: Mutex<Option<String>>,
    writes: AtomicU64,
}

impl MockTransport {
    /// Creates a reachable mock transport with no remote blob.
    pub fn new() -> Self {
        Self {
            reachable: AtomicBool::new(true),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            remote: Mutex::new(None),
            writes: AtomicU64::new(0),
        }
    }

    /// Sets whether probes succeed.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Makes subsequent reads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds the remote blob.
    pub fn seed(&self, content: impl Into<String>) {
        *self.remote.lock() = Some(content.into());
    }

    /// Returns the current remote blob.
    pub fn remote_content(&self) -> Option<String> {
        self.remote.lock().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RemoteTransport for MockTransport {
    fn probe(&self, _locator: &str) -> SyncResult<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SyncError::transport("mock endpoint unreachable"))
        }
    }

    fn read(&self, _locator: &str) -> SyncResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SyncError::transport("mock read failure"));
        }
        Ok(self.remote.lock().clone())
    }

    fn write(&self, _locator: &str, content: &str) -> SyncResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SyncError::transport("mock write failure"));
        }
        *self.remote.lock() = Some(content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

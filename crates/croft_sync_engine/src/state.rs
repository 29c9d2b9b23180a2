//! Sync engine and session state machine.

use crate::conflict::{ConflictPolicy, SnapshotDecision};
use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteTransport;
use croft_model::{Dataset, SyncDocument, Timestamp};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The current state of the sync session.
///
/// Transitions are `Idle -> Uploading -> Idle` and
/// `Idle -> Downloading -> Idle`. A transition out of `Idle` is refused
/// while another is active; the refused call is a no-op, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No sync operation in flight.
    Idle,
    /// A snapshot upload is in flight.
    Uploading,
    /// A snapshot download is in flight.
    Downloading,
}

impl SyncState {
    /// Returns true if a sync operation is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, SyncState::Idle)
    }
}

/// How an upload or download call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The local snapshot was written to the remote.
    Uploaded,
    /// The remote snapshot wholesale-replaced the local dataset; the
    /// caller should reload its in-memory view of the data.
    Adopted,
    /// The remote snapshot was not newer; local state is untouched.
    NoChange,
    /// Nothing has ever been written at the remote locator.
    NothingToSync,
    /// Another sync operation was in flight; this call did nothing.
    SkippedBusy,
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SyncOutcome::Uploaded => "uploaded",
            SyncOutcome::Adopted => "adopted remote",
            SyncOutcome::NoChange => "no change",
            SyncOutcome::NothingToSync => "nothing to sync",
            SyncOutcome::SkippedBusy => "skipped (busy)",
        };
        f.write_str(label)
    }
}

/// Result of a full sync cycle.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// How the upload leg ended.
    pub uploaded: SyncOutcome,
    /// How the download leg ended.
    pub downloaded: SyncOutcome,
    /// Wall-clock duration of the cycle.
    pub duration: Duration,
}

/// A read-only snapshot of the engine's configuration for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncStatus {
    /// Whether a sync endpoint is configured.
    pub connected: bool,
    /// Locator of the configured endpoint, if any.
    pub endpoint: Option<String>,
    /// Stamp of the snapshot the local dataset last reflected.
    pub last_sync: Option<Timestamp>,
}

/// The local store as the engine sees it.
///
/// The engine is the sole writer-on-behalf-of-remote into the store; the
/// surrounding application owns every other mutation. Reads are served
/// from memory and cannot fail; mutations persist and can.
pub trait SyncStore: Send + Sync {
    /// Returns a copy of the current dataset for snapshotting.
    fn snapshot(&self) -> Dataset;

    /// Wholesale-replaces the dataset with a downloaded one.
    fn adopt(&self, dataset: Dataset) -> SyncResult<()>;

    /// Returns the configured endpoint locator.
    fn endpoint(&self) -> Option<String>;

    /// Persists the endpoint locator.
    fn set_endpoint(&self, locator: &str) -> SyncResult<()>;

    /// Clears the endpoint locator. Idempotent.
    fn clear_endpoint(&self) -> SyncResult<()>;

    /// Returns the stamp the local dataset is known to reflect.
    fn last_sync(&self) -> Option<Timestamp>;

    /// Records the stamp the local dataset now reflects.
    fn set_last_sync(&self, stamp: &Timestamp) -> SyncResult<()>;
}

/// Releases the session back to `Idle` on every exit path.
struct SessionGuard<'a> {
    state: &'a Mutex<SyncState>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = SyncState::Idle;
    }
}

/// The sync engine keeps one device's dataset consistent with a single
/// shared remote location.
///
/// Exactly one engine exists per running application; the caller
/// constructs it at startup and passes it by reference to whatever
/// invokes sync. There is no module-level instance.
pub struct SyncEngine<T: RemoteTransport, S: SyncStore> {
    transport: Arc<T>,
    store: Arc<S>,
    state: Mutex<SyncState>,
    policy: ConflictPolicy,
}

impl<T: RemoteTransport, S: SyncStore> SyncEngine<T, S> {
    /// Creates a new sync engine with the last-write-wins policy.
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport: Arc::new(transport),
            store: Arc::new(store),
            state: Mutex::new(SyncState::Idle),
            policy: ConflictPolicy::default(),
        }
    }

    /// Sets the conflict policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Gets the current session state.
    pub fn state(&self) -> SyncState {
        *self.state.lock()
    }

    /// Returns the store this engine synchronizes.
    pub fn store(&self) -> &S {
        self.store.as_ref()
    }

    /// Gets the conflict policy.
    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Probes whether the remote location can be read and written.
    ///
    /// Never fails to the caller: probe failures become `false` plus a
    /// logged diagnostic. Nothing is persisted.
    pub fn test_connection(&self, locator: &str) -> bool {
        match self.transport.probe(locator) {
            Ok(()) => true,
            Err(e) => {
                warn!(locator, error = %e, "connection probe failed");
                false
            }
        }
    }

    /// Probes `locator` and, on success, persists it as the active
    /// endpoint.
    ///
    /// On probe failure the prior configuration is left untouched and
    /// `false` is returned. There is no automatic retry.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the new endpoint fails.
    pub fn configure(&self, locator: &str) -> SyncResult<bool> {
        if !self.test_connection(locator) {
            return Ok(false);
        }

        self.store.set_endpoint(locator)?;
        info!(locator, "sync endpoint configured");
        Ok(true)
    }

    /// Clears the configured endpoint. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleared configuration cannot be persisted.
    pub fn disconnect(&self) -> SyncResult<()> {
        self.store.clear_endpoint()?;
        info!("sync endpoint cleared");
        Ok(())
    }

    /// Returns whether an endpoint is configured.
    ///
    /// A pure predicate over configuration; does not re-probe
    /// reachability.
    pub fn is_connected(&self) -> bool {
        self.store.endpoint().is_some()
    }

    /// Returns a read-only status snapshot for display. No side effects.
    pub fn status(&self) -> SyncStatus {
        let endpoint = self.store.endpoint();
        SyncStatus {
            connected: endpoint.is_some(),
            endpoint,
            last_sync: self.store.last_sync(),
        }
    }

    /// Uploads a fresh snapshot of the local dataset to the remote.
    ///
    /// Builds the snapshot stamped with the current time, writes it
    /// wholesale, and records the stamp as the state the local dataset now
    /// reflects. If a session is already in flight the call is a logged
    /// no-op (`SkippedBusy`).
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without an endpoint, or `Transport` if the
    /// remote write fails; local state is untouched on failure.
    pub fn upload(&self) -> SyncResult<SyncOutcome> {
        let locator = self.store.endpoint().ok_or(SyncError::NotConfigured)?;

        let Some(_session) = self.begin(SyncState::Uploading) else {
            debug!("upload skipped: sync already in progress");
            return Ok(SyncOutcome::SkippedBusy);
        };

        let document = SyncDocument::snapshot(self.store.snapshot());
        let content = document
            .to_json()
            .map_err(|e| SyncError::Codec(e.to_string()))?;

        self.transport.write(&locator, &content)?;
        self.store.set_last_sync(&document.last_sync)?;

        info!(
            locator = %locator,
            stamp = %document.last_sync,
            records = document.dataset.record_count(),
            "snapshot uploaded"
        );
        Ok(SyncOutcome::Uploaded)
    }

    /// Downloads the remote snapshot and reconciles it against local
    /// state.
    ///
    /// A missing remote is "nothing to sync" (first-run case), not an
    /// error. A remote that exists but fails to parse is `CorruptData`.
    /// Whether an existing snapshot is adopted is decided by the conflict
    /// policy; adoption replaces the local dataset wholesale and the
    /// `Adopted` outcome is the caller's signal to reload its in-memory
    /// view.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without an endpoint, `Transport` if the
    /// remote read fails, or `CorruptData` if the blob does not parse;
    /// local state is untouched on every failure.
    pub fn download(&self) -> SyncResult<SyncOutcome> {
        let locator = self.store.endpoint().ok_or(SyncError::NotConfigured)?;

        let Some(_session) = self.begin(SyncState::Downloading) else {
            debug!("download skipped: sync already in progress");
            return Ok(SyncOutcome::SkippedBusy);
        };

        let Some(content) = self.transport.read(&locator)? else {
            debug!(locator = %locator, "remote snapshot absent; nothing to download");
            return Ok(SyncOutcome::NothingToSync);
        };

        let document = SyncDocument::from_json(&content)
            .map_err(|e| SyncError::CorruptData(e.to_string()))?;

        let local = self.store.last_sync();
        match self.policy.resolve(local.as_ref(), &document.last_sync) {
            SnapshotDecision::AdoptRemote => {
                let stamp = document.last_sync.clone();
                self.store.adopt(document.into_dataset())?;
                self.store.set_last_sync(&stamp)?;
                info!(locator = %locator, stamp = %stamp, "remote snapshot adopted");
                Ok(SyncOutcome::Adopted)
            }
            SnapshotDecision::KeepLocal => {
                debug!(
                    locator = %locator,
                    remote = %document.last_sync,
                    "remote snapshot not newer; keeping local state"
                );
                Ok(SyncOutcome::NoChange)
            }
        }
    }

    /// Performs a full cycle: upload, then download.
    ///
    /// Upload-first ensures this device's state reaches the remote before
    /// a possibly-stale remote copy is considered for adoption. The flip
    /// side is that concurrent edits race on wall-clock stamps: whoever's
    /// cycle runs second wins, and the other device's concurrent edits are
    /// discarded. That is the documented last-writer-wins tradeoff, not an
    /// accident.
    ///
    /// # Errors
    ///
    /// Propagates the first failing leg.
    pub fn sync(&self) -> SyncResult<SyncReport> {
        let start = Instant::now();
        let uploaded = self.upload()?;
        let downloaded = self.download()?;
        Ok(SyncReport {
            uploaded,
            downloaded,
            duration: start.elapsed(),
        })
    }

    /// Enters `next` if the session is idle.
    fn begin(&self, next: SyncState) -> Option<SessionGuard<'_>> {
        let mut state = self.state.lock();
        if state.is_active() {
            return None;
        }
        *state = next;
        Some(SessionGuard { state: &self.state })
    }
}

/// An in-memory store for testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RwLock<Dataset>,
    endpoint: RwLock<Option<String>>,
    last_sync: RwLock<Option<Timestamp>>,
}

impl MemoryStore {
    /// Creates an empty, unconfigured memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a memory store with an endpoint already configured.
    pub fn connected(locator: impl Into<String>) -> Self {
        let store = Self::default();
        *store.endpoint.write() = Some(locator.into());
        store
    }

    /// Replaces the dataset directly (simulating local edits).
    pub fn set_dataset(&self, dataset: Dataset) {
        *self.dataset.write() = dataset;
    }

    /// Returns a copy of the dataset.
    pub fn dataset(&self) -> Dataset {
        self.dataset.read().clone()
    }
}

impl SyncStore for MemoryStore {
    fn snapshot(&self) -> Dataset {
        self.dataset.read().clone()
    }

    fn adopt(&self, dataset: Dataset) -> SyncResult<()> {
        *self.dataset.write() = dataset;
        Ok(())
    }

    fn endpoint(&self) -> Option<String> {
        self.endpoint.read().clone()
    }

    fn set_endpoint(&self, locator: &str) -> SyncResult<()> {
        *self.endpoint.write() = Some(locator.to_string());
        Ok(())
    }

    fn clear_endpoint(&self) -> SyncResult<()> {
        *self.endpoint.write() = None;
        Ok(())
    }

    fn last_sync(&self) -> Option<Timestamp> {
        self.last_sync.read().clone()
    }

    fn set_last_sync(&self, stamp: &Timestamp) -> SyncResult<()> {
        *self.last_sync.write() = Some(stamp.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use croft_model::{Note, Project};

    const LOCATOR: &str = "/mnt/nas/croft.json";

    fn ts(value: &str) -> Timestamp {
        Timestamp::parse(value).unwrap()
    }

    fn dataset_with_projects(names: &[&str]) -> Dataset {
        Dataset {
            projects: names.iter().map(|name| Project::new(*name)).collect(),
            ..Dataset::default()
        }
    }

    fn engine_with_remote() -> SyncEngine<MockTransport, MemoryStore> {
        SyncEngine::new(MockTransport::new(), MemoryStore::connected(LOCATOR))
    }

    #[test]
    fn initial_state_is_idle_and_disconnected() {
        let engine = SyncEngine::new(MockTransport::new(), MemoryStore::new());
        assert_eq!(engine.state(), SyncState::Idle);
        assert!(!engine.is_connected());

        let status = engine.status();
        assert!(!status.connected);
        assert_eq!(status.endpoint, None);
        assert_eq!(status.last_sync, None);
    }

    #[test]
    fn unconfigured_upload_and_download_fail() {
        let engine = SyncEngine::new(MockTransport::new(), MemoryStore::new());
        assert!(matches!(engine.upload(), Err(SyncError::NotConfigured)));
        assert!(matches!(engine.download(), Err(SyncError::NotConfigured)));
    }

    #[test]
    fn test_connection_converts_failure_to_false() {
        let engine = SyncEngine::new(MockTransport::new(), MemoryStore::new());
        assert!(engine.test_connection(LOCATOR));

        engine.transport.set_reachable(false);
        assert!(!engine.test_connection(LOCATOR));
    }

    #[test]
    fn configure_persists_only_on_successful_probe() {
        let engine = SyncEngine::new(MockTransport::new(), MemoryStore::new());

        assert!(engine.configure(LOCATOR).unwrap());
        assert!(engine.is_connected());

        // A failed probe leaves the prior endpoint untouched.
        engine.transport.set_reachable(false);
        assert!(!engine.configure("/mnt/other/croft.json").unwrap());
        assert_eq!(engine.status().endpoint.as_deref(), Some(LOCATOR));
    }

    #[test]
    fn disconnect_is_idempotent() {
        let engine = engine_with_remote();
        engine.disconnect().unwrap();
        engine.disconnect().unwrap();
        assert!(!engine.is_connected());
    }

    #[test]
    fn upload_writes_snapshot_and_records_stamp() {
        let engine = engine_with_remote();
        engine.store.set_dataset(dataset_with_projects(&["A", "B"]));

        assert_eq!(engine.upload().unwrap(), SyncOutcome::Uploaded);
        assert_eq!(engine.state(), SyncState::Idle);

        let blob = engine.transport.remote_content().unwrap();
        let document = SyncDocument::from_json(&blob).unwrap();
        assert_eq!(document.dataset.projects.len(), 2);
        assert_eq!(engine.store.last_sync(), Some(document.last_sync));
    }

    #[test]
    fn repeated_upload_differs_only_in_stamp() {
        let engine = engine_with_remote();
        engine.store.set_dataset(dataset_with_projects(&["A"]));

        engine.upload().unwrap();
        let first = SyncDocument::from_json(&engine.transport.remote_content().unwrap()).unwrap();

        engine.upload().unwrap();
        let second = SyncDocument::from_json(&engine.transport.remote_content().unwrap()).unwrap();

        assert_eq!(first.dataset, second.dataset);
        assert!(second.last_sync >= first.last_sync);
        assert_eq!(engine.transport.write_count(), 2);
    }

    #[test]
    fn upload_failure_leaves_local_state_untouched() {
        let engine = engine_with_remote();
        engine.transport.fail_writes(true);

        assert!(matches!(engine.upload(), Err(SyncError::Transport { .. })));
        assert_eq!(engine.store.last_sync(), None);
        // Session released: a later upload may proceed.
        assert_eq!(engine.state(), SyncState::Idle);

        engine.transport.fail_writes(false);
        assert_eq!(engine.upload().unwrap(), SyncOutcome::Uploaded);
    }

    #[test]
    fn busy_session_skips_without_error() {
        let engine = engine_with_remote();
        let _session = engine.begin(SyncState::Downloading).unwrap();

        assert_eq!(engine.upload().unwrap(), SyncOutcome::SkippedBusy);
        assert_eq!(engine.download().unwrap(), SyncOutcome::SkippedBusy);
        // The in-flight session still owns the state.
        assert_eq!(engine.state(), SyncState::Downloading);
        assert_eq!(engine.transport.write_count(), 0);
    }

    #[test]
    fn session_flag_resets_after_guard_drops() {
        let engine = engine_with_remote();
        {
            let _session = engine.begin(SyncState::Uploading).unwrap();
            assert!(engine.begin(SyncState::Downloading).is_none());
        }
        assert_eq!(engine.state(), SyncState::Idle);
        assert!(engine.begin(SyncState::Downloading).is_some());
    }

    #[test]
    fn download_missing_remote_is_nothing_to_sync() {
        let engine = engine_with_remote();
        assert_eq!(engine.download().unwrap(), SyncOutcome::NothingToSync);
        assert!(engine.store.dataset().is_empty());
    }

    #[test]
    fn download_adopts_strictly_newer_remote() {
        let engine = engine_with_remote();
        engine
            .store
            .set_last_sync(&ts("2024-01-01T10:00:00.000Z"))
            .unwrap();

        let remote = SyncDocument::stamped(
            dataset_with_projects(&["X", "Y", "Z"]),
            ts("2024-01-01T12:00:00.000Z"),
        );
        engine.transport.seed(remote.to_json().unwrap());

        assert_eq!(engine.download().unwrap(), SyncOutcome::Adopted);
        assert_eq!(engine.store.dataset().projects.len(), 3);
        assert_eq!(
            engine.store.last_sync(),
            Some(ts("2024-01-01T12:00:00.000Z"))
        );
    }

    #[test]
    fn download_keeps_local_when_remote_not_newer() {
        let engine = engine_with_remote();
        engine.store.set_dataset(dataset_with_projects(&["mine"]));
        engine
            .store
            .set_last_sync(&ts("2024-01-01T12:00:00.000Z"))
            .unwrap();

        for remote_stamp in ["2024-01-01T12:00:00.000Z", "2024-01-01T09:00:00.000Z"] {
            let remote =
                SyncDocument::stamped(dataset_with_projects(&["theirs"]), ts(remote_stamp));
            engine.transport.seed(remote.to_json().unwrap());

            assert_eq!(engine.download().unwrap(), SyncOutcome::NoChange);
            assert_eq!(engine.store.dataset().projects[0].name, "mine");
        }
    }

    #[test]
    fn corrupt_remote_surfaces_error_and_leaves_local() {
        let engine = engine_with_remote();
        engine.store.set_dataset(dataset_with_projects(&["mine"]));
        engine.transport.seed("this is not json");

        assert!(matches!(
            engine.download(),
            Err(SyncError::CorruptData(_))
        ));
        assert_eq!(engine.store.dataset().projects.len(), 1);
        assert_eq!(engine.state(), SyncState::Idle);

        // A shape mismatch (no lastSync) is corrupt too.
        engine.transport.seed("{\"projects\":[]}");
        assert!(matches!(engine.download(), Err(SyncError::CorruptData(_))));
    }

    #[test]
    fn download_read_failure_surfaces_transport_error() {
        let engine = engine_with_remote();
        engine.transport.fail_reads(true);
        assert!(matches!(engine.download(), Err(SyncError::Transport { .. })));
        assert_eq!(engine.state(), SyncState::Idle);
    }

    #[test]
    fn sync_reads_back_own_upload_as_no_change() {
        let engine = engine_with_remote();
        engine.store.set_dataset(Dataset {
            notes: vec![Note::new("Bottling", "250 units")],
            ..Dataset::default()
        });

        let report = engine.sync().unwrap();
        assert_eq!(report.uploaded, SyncOutcome::Uploaded);
        assert_eq!(report.downloaded, SyncOutcome::NoChange);
        assert_eq!(engine.store.dataset().notes.len(), 1);
    }
}

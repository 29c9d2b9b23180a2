//! # Croft Sync Engine
//!
//! Snapshot synchronization for Croft.
//!
//! This crate provides:
//! - Sync session state machine (idle → uploading/downloading → idle)
//! - Last-write-wins conflict policy over snapshot stamps
//! - Remote transport abstraction (mounted share, mock for tests)
//! - Upload, download, and full-cycle orchestration
//!
//! ## Architecture
//!
//! The engine implements an **upload-then-download** model against a
//! single shared JSON blob:
//! 1. Write a freshly stamped snapshot of the local dataset to the remote
//! 2. Read the remote back and compare stamps
//! 3. Adopt the remote wholesale if it is strictly newer
//!
//! There is no field-level merge and no remote locking; the later stamp
//! wins outright. Two devices editing concurrently race on wall-clock
//! stamps, and the loser's edits are discarded. That tradeoff is
//! deliberate and documented on [`ConflictPolicy`].
//!
//! ## Key Invariants
//!
//! - A snapshot's stamp is set when it is produced for upload, never
//!   backdated
//! - At most one upload or download is in flight per engine; a second
//!   call is a logged no-op, not an error and not queued
//! - A missing remote is "nothing to sync", a corrupt remote is an error
//! - Failed calls leave local and remote state in their last-known
//!   configuration

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod conflict;
mod error;
mod mount;
mod state;
mod transport;

pub use conflict::{ConflictPolicy, SnapshotDecision};
pub use error::{SyncError, SyncResult};
pub use mount::MountTransport;
pub use state::{MemoryStore, SyncEngine, SyncOutcome, SyncReport, SyncState, SyncStatus, SyncStore};
pub use transport::{MockTransport, RemoteTransport};

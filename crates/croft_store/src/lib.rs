//! # Croft Store
//!
//! Device-local persisted store for Croft.
//!
//! This crate owns the on-disk layout of one device's data directory:
//! the dataset itself plus the device configuration (sync endpoint and
//! last-sync stamp), with advisory locking and atomic file replacement.
//! The sync engine reads and writes the store only through this crate's
//! accessor API.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dir;
mod error;
mod store;

pub use config::DeviceConfig;
pub use dir::StoreDir;
pub use error::{StoreError, StoreResult};
pub use store::Store;

//! CLI command implementations.

pub mod connect;
pub mod status;
pub mod sync;

use croft_store::Store;
use croft_sync_engine::{MountTransport, SyncEngine};
use std::path::Path;

/// Opens the store and builds the one engine this invocation uses.
pub(crate) fn open_engine(
    store_path: &Path,
) -> Result<SyncEngine<MountTransport, Store>, Box<dyn std::error::Error>> {
    let store = Store::open(store_path, true)?;
    Ok(SyncEngine::new(MountTransport::new(), store))
}

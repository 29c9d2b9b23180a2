//! Connect and disconnect commands.

use std::path::Path;

/// Runs the connect command.
///
/// A failed probe reports failure and leaves any previously configured
/// endpoint intact, so the last-good settings survive a typo or an
/// unmounted share.
pub fn run(store_path: &Path, share_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(store_path)?;

    if engine.configure(share_path)? {
        println!("Connected: {share_path}");
        Ok(())
    } else {
        Err(format!("Connection failed: {share_path} is not reachable or not writable").into())
    }
}

/// Runs the disconnect command.
pub fn disconnect(store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(store_path)?;
    engine.disconnect()?;
    println!("Disconnected");
    Ok(())
}

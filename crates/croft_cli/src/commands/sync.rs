//! Sync, push, and pull commands.

use croft_sync_engine::SyncOutcome;
use std::path::Path;

/// Which legs of the cycle to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Upload then download.
    Full,
    /// Upload only.
    Push,
    /// Download only.
    Pull,
}

/// Runs the sync, push, or pull command.
pub fn run(store_path: &Path, mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(store_path)?;

    match mode {
        Mode::Full => {
            let report = engine.sync()?;
            println!(
                "Sync finished in {} ms: upload {}, download {}",
                report.duration.as_millis(),
                report.uploaded,
                report.downloaded
            );
            remind_reload(report.downloaded);
        }
        Mode::Push => {
            let outcome = engine.upload()?;
            println!("Push: {outcome}");
        }
        Mode::Pull => {
            let outcome = engine.download()?;
            println!("Pull: {outcome}");
            remind_reload(outcome);
        }
    }

    Ok(())
}

fn remind_reload(outcome: SyncOutcome) {
    if outcome == SyncOutcome::Adopted {
        println!("Local dataset replaced by remote snapshot; reload any open views.");
    }
}

//! Status command implementation.

use croft_sync_engine::SyncStore;
use serde_json::json;
use std::path::Path;

/// Runs the status command.
pub fn run(store_path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::open_engine(store_path)?;
    let status = engine.status();
    let records = engine.store().snapshot().record_count();

    match format {
        "json" => {
            let out = json!({
                "store": store_path.display().to_string(),
                "connected": status.connected,
                "endpoint": status.endpoint,
                "lastSync": status.last_sync.map(String::from),
                "records": records,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "text" => {
            println!("Store:     {}", store_path.display());
            match &status.endpoint {
                Some(endpoint) => println!("Endpoint:  {endpoint}"),
                None => println!("Endpoint:  (not configured)"),
            }
            match &status.last_sync {
                Some(stamp) => println!("Last sync: {stamp}"),
                None => println!("Last sync: never"),
            }
            println!("Records:   {records}");
        }
        other => return Err(format!("Unknown format: {other}").into()),
    }

    Ok(())
}

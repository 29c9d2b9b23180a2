//! Transport over a mounted network share.
//!
//! The endpoint locator is a plain file path on a mapped drive or mounted
//! SMB share (typically reached over a mesh VPN). The host OS owns the
//! actual network I/O; from here it looks like slow, occasionally absent
//! filesystem access.

use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteTransport;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Name of the scratch file used by connection probes.
const PROBE_FILE: &str = ".croft-probe";
/// Suffix for the temporary file used in atomic writes.
const TEMP_SUFFIX: &str = ".tmp";

/// A transport backed by a path on a mounted share.
///
/// Writes replace the blob atomically (temp file next to the target, then
/// rename), so a reader on another device never observes a half-written
/// snapshot, within whatever atomicity the mount itself provides.
#[derive(Debug, Default)]
pub struct MountTransport;

impl MountTransport {
    /// Creates a mount transport.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parent_of(locator: &str) -> SyncResult<&Path> {
        Path::new(locator)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .ok_or_else(|| SyncError::transport(format!("locator has no parent directory: {locator}")))
    }

    fn transport_err(context: &str, locator: &str, err: &io::Error) -> SyncError {
        SyncError::transport(format!("{context} {locator}: {err}"))
    }
}

impl RemoteTransport for MountTransport {
    /// Probes by writing and removing a scratch file next to the blob.
    ///
    /// Upload needs write access, so a read-only mount counts as
    /// unreachable.
    fn probe(&self, locator: &str) -> SyncResult<()> {
        let parent = Self::parent_of(locator)?;
        if !parent.is_dir() {
            return Err(SyncError::transport(format!(
                "share directory not mounted: {}",
                parent.display()
            )));
        }

        let probe_path = parent.join(PROBE_FILE);
        let mut file = File::create(&probe_path)
            .map_err(|e| Self::transport_err("cannot write to share at", locator, &e))?;
        file.write_all(b"probe")
            .map_err(|e| Self::transport_err("cannot write to share at", locator, &e))?;
        file.sync_all()
            .map_err(|e| Self::transport_err("cannot write to share at", locator, &e))?;
        drop(file);

        fs::remove_file(&probe_path)
            .map_err(|e| Self::transport_err("cannot clean up probe at", locator, &e))?;

        Ok(())
    }

    fn read(&self, locator: &str) -> SyncResult<Option<String>> {
        match fs::read_to_string(locator) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::transport_err("cannot read snapshot at", locator, &e)),
        }
    }

    fn write(&self, locator: &str, content: &str) -> SyncResult<()> {
        let parent = Self::parent_of(locator)?;
        if !parent.is_dir() {
            return Err(SyncError::transport(format!(
                "share directory not mounted: {}",
                parent.display()
            )));
        }

        let temp_path = {
            let mut name = Path::new(locator)
                .file_name()
                .ok_or_else(|| SyncError::transport(format!("locator has no file name: {locator}")))?
                .to_os_string();
            name.push(TEMP_SUFFIX);
            parent.join(name)
        };

        let write_temp = || -> io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            Ok(())
        };
        write_temp().map_err(|e| Self::transport_err("cannot write snapshot at", locator, &e))?;

        fs::rename(&temp_path, locator)
            .map_err(|e| Self::transport_err("cannot replace snapshot at", locator, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn locator_in(tmp: &TempDir) -> String {
        tmp.path().join("croft.json").to_string_lossy().into_owned()
    }

    #[test]
    fn probe_succeeds_on_writable_directory() {
        let tmp = TempDir::new().unwrap();
        let locator = locator_in(&tmp);

        MountTransport::new().probe(&locator).unwrap();
        // Scratch file cleaned up.
        assert!(!tmp.path().join(PROBE_FILE).exists());
    }

    #[test]
    fn probe_fails_when_directory_missing() {
        let tmp = TempDir::new().unwrap();
        let locator = tmp
            .path()
            .join("not-mounted")
            .join("croft.json")
            .to_string_lossy()
            .into_owned();

        let result = MountTransport::new().probe(&locator);
        assert!(matches!(result, Err(SyncError::Transport { .. })));
    }

    #[test]
    fn read_missing_blob_is_none() {
        let tmp = TempDir::new().unwrap();
        let transport = MountTransport::new();
        assert_eq!(transport.read(&locator_in(&tmp)).unwrap(), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = TempDir::new().unwrap();
        let transport = MountTransport::new();
        let locator = locator_in(&tmp);

        transport.write(&locator, "{\"lastSync\":\"x\"}").unwrap();
        assert_eq!(
            transport.read(&locator).unwrap().as_deref(),
            Some("{\"lastSync\":\"x\"}")
        );
        // No temp file left behind.
        assert!(!tmp.path().join("croft.json.tmp").exists());
    }

    #[test]
    fn write_replaces_whole_blob() {
        let tmp = TempDir::new().unwrap();
        let transport = MountTransport::new();
        let locator = locator_in(&tmp);

        transport.write(&locator, "first").unwrap();
        transport.write(&locator, "second").unwrap();
        assert_eq!(transport.read(&locator).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let locator = tmp
            .path()
            .join("gone")
            .join("croft.json")
            .to_string_lossy()
            .into_owned();

        let result = MountTransport::new().write(&locator, "{}");
        assert!(matches!(result, Err(SyncError::Transport { .. })));
    }
}

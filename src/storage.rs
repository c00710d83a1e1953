//! Filename derivation and local save of generated payloads.

use crate::model::TimeEntry;
use anyhow::{Context, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixed name for a multi-entry export; the service bundles those into one
/// archive on its side.
pub const ARCHIVE_FILENAME: &str = "runs.zip";

/// Filename for a single generated activity file. Digit sequences are
/// concatenated unpadded, matching the service's web client byte-for-byte.
pub fn single_filename(entry: &TimeEntry) -> String {
    format!(
        "run_{}{}{}_{}{}{}.tcx",
        entry.year, entry.month, entry.day, entry.hour, entry.minute, entry.second
    )
}

/// Derive the save name from the submitted entries: one entry gets the
/// timestamped name, anything more gets the fixed archive name.
pub fn filename_for(times: &[TimeEntry]) -> String {
    match times {
        [only] => single_filename(only),
        _ => ARCHIVE_FILENAME.to_string(),
    }
}

/// Default save location: the user's download directory when the platform
/// reports one, else the current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write the payload under `dir/name` and return the full path.
/// The file handle is dropped on every path out of here, whether or not the
/// write succeeded; no stronger durability is attempted.
pub fn save_payload(dir: &Path, name: &str, payload: &Bytes) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;
    let path = dir.join(name);
    let mut file =
        File::create(&path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(payload)
        .with_context(|| format!("write {}", path.display()))?;
    file.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_filename_is_unpadded() {
        let entry = TimeEntry {
            year: 2024,
            month: 3,
            day: 5,
            hour: 7,
            minute: 8,
            second: 9,
        };
        assert_eq!(single_filename(&entry), "run_202435_789.tcx");
    }

    #[test]
    fn single_filename_keeps_wide_values_as_typed() {
        let entry = TimeEntry {
            year: 2024,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 58,
        };
        assert_eq!(single_filename(&entry), "run_20241231_235958.tcx");
    }

    #[test]
    fn multi_entry_export_uses_archive_name() {
        let entry = TimeEntry {
            year: 2024,
            month: 3,
            day: 5,
            hour: 7,
            minute: 8,
            second: 9,
        };
        assert_eq!(filename_for(&[entry]), "run_202435_789.tcx");
        assert_eq!(filename_for(&[entry, entry]), ARCHIVE_FILENAME);
        assert_eq!(filename_for(&[entry, entry, entry]), ARCHIVE_FILENAME);
    }

    #[test]
    fn save_payload_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let payload = Bytes::from_static(b"<TrainingCenterDatabase/>");
        let path = save_payload(dir.path(), "run_202435_789.tcx", &payload).unwrap();
        assert_eq!(path, dir.path().join("run_202435_789.tcx"));
        assert_eq!(std::fs::read(&path).unwrap(), payload.as_ref());
    }

    #[test]
    fn save_payload_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("runs");
        let payload = Bytes::from_static(b"zip-bytes");
        let path = save_payload(&nested, ARCHIVE_FILENAME, &payload).unwrap();
        assert!(path.exists());
    }
}

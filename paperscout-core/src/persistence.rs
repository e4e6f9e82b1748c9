//! Saving and loading the results file.
//!
//! Results are written as indented JSON through a `.tmp` sibling that is then
//! renamed over the target, so a failed run never leaves a truncated file.

use serde::Serialize;
use std::io;
use std::path::Path;

use crate::error::PersistenceError;
use crate::types::EnrichedPaperRecord;

/// Write `records` to `path`, replacing any existing file.
pub fn save_records(path: &Path, records: &[EnrichedPaperRecord]) -> Result<(), PersistenceError> {
    let json = to_indented_json(records)?;
    atomic_write(path, json.as_bytes()).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = records.len(), "Saved paper records");
    Ok(())
}

/// Read records previously written by [`save_records`].
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_records(path: &Path) -> Result<Option<Vec<EnrichedPaperRecord>>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = serde_json::from_str(&data).map_err(|e| PersistenceError::Read {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    Ok(Some(records))
}

/// Serialize with four-space indentation.
fn to_indented_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write to a `.tmp` sibling, then rename onto `path`.
/// Creates parent directories if they don't exist.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

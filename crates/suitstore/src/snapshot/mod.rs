//! Whole-collection persistence for the record store.
//!
//! [`save`] writes every record in a [`RecordStore`] to one file and
//! [`load`] reads such a file back, replacing the store's contents. Neither
//! operation returns an error: saving reports a [`SaveOutcome`], and loading
//! yields `None` when the file is missing or unreadable, logging the cause.

pub mod format;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::SuitRecord;
use crate::store::RecordStore;

/// Directory used when none is given.
pub const DEFAULT_DIRECTORY: &str = ".";

/// File name used when none is given.
pub const DEFAULT_FILE_NAME: &str = "trajes_espaciales.dat";

/// Result of a [`save`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot was written.
    Saved {
        /// Absolute path of the written file.
        path: PathBuf,
        /// Number of records written.
        records: usize,
    },
    /// The snapshot could not be written.
    Failed {
        /// The path that was attempted.
        path: PathBuf,
        /// Why the write failed.
        reason: String,
    },
}

impl SaveOutcome {
    /// Whether the snapshot was written.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// The written or attempted path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    /// Human-readable outcome for display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved { path, records } => {
                write!(f, "saved {records} suits to {}", path.display())
            }
            Self::Failed { path, reason } => {
                write!(f, "error saving to {}: {reason}", path.display())
            }
        }
    }
}

/// Result of a successful [`load_report`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// The file that was read.
    pub path: PathBuf,
    /// Records now held by the store.
    pub records: Vec<SuitRecord>,
    /// Elements of the file that were discarded as unusable.
    pub dropped: usize,
}

/// Resolve the snapshot path, substituting defaults for absent or blank parts.
#[must_use]
pub fn resolve_path(directory: Option<&str>, file_name: Option<&str>) -> PathBuf {
    let directory = non_blank(directory).unwrap_or(DEFAULT_DIRECTORY);
    let file_name = non_blank(file_name).unwrap_or(DEFAULT_FILE_NAME);
    Path::new(directory).join(file_name)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Write every record in `store` to the resolved snapshot path.
///
/// Any existing file at that path is overwritten.
pub fn save(store: &RecordStore, directory: Option<&str>, file_name: Option<&str>) -> SaveOutcome {
    let path = resolve_path(directory, file_name);
    debug!("Saving {} suits to {}", store.len(), path.display());

    let records = store.list();
    match format::encode(&records).and_then(|bytes| write_replacing(&path, &bytes)) {
        Ok(()) => {
            let path = absolute(&path);
            info!("Saved {} suits to {}", records.len(), path.display());
            SaveOutcome::Saved {
                path,
                records: records.len(),
            }
        }
        Err(e) => {
            warn!("Failed to save snapshot to {}: {}", path.display(), e);
            SaveOutcome::Failed {
                path,
                reason: e.to_string(),
            }
        }
    }
}

/// Read the resolved snapshot and replace the contents of `store` with it.
///
/// Returns the records now in the store, or `None` if the file does not
/// exist or cannot be read as a snapshot. On `None` the store is untouched.
pub fn load(
    store: &mut RecordStore,
    directory: Option<&str>,
    file_name: Option<&str>,
) -> Option<Vec<SuitRecord>> {
    load_report(store, directory, file_name).map(|report| report.records)
}

/// Like [`load`], but also reports how many file elements were dropped.
pub fn load_report(
    store: &mut RecordStore,
    directory: Option<&str>,
    file_name: Option<&str>,
) -> Option<LoadReport> {
    let path = resolve_path(directory, file_name);
    if !path.is_file() {
        debug!("No snapshot at {}", path.display());
        return None;
    }

    let decoded = match fs::read(&path)
        .map_err(Into::into)
        .and_then(|bytes| format::decode(&bytes))
    {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to load snapshot from {}: {}", path.display(), e);
            return None;
        }
    };

    if decoded.dropped > 0 {
        warn!(
            "Discarded {} unusable entries from {}",
            decoded.dropped,
            path.display()
        );
    }
    info!(
        "Loaded {} suits from {}",
        decoded.records.len(),
        path.display()
    );

    store.replace_all(decoded.records.clone());
    Some(LoadReport {
        path,
        records: decoded.records,
        dropped: decoded.dropped,
    })
}

/// Write `bytes` next to `path` and rename over it.
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map_or_else(|| DEFAULT_FILE_NAME.into(), |n| n.to_string_lossy());
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

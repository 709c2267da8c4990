//! Local counters of sorted items, persisted as a small JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sorting::Bin;

#[derive(thiserror::Error, Debug)]
/// Errors raised while reading or writing the statistics file.
pub enum StatsError {
    /// File system operation failed.
    #[error("Statistics file {path}: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file does not contain valid statistics.
    #[error("Malformed statistics: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Running totals of scanned items.
pub struct ScanStats {
    /// Number of items scanned overall.
    pub items_scanned: u64,
    /// Number of items sent to each bin.
    pub per_bin: BTreeMap<Bin, u64>,
    /// Time of the most recent scan.
    pub last_scan: Option<DateTime<Utc>>,
}

impl ScanStats {
    /// Items sent to `bin`.
    #[must_use]
    pub fn count_for(&self, bin: Bin) -> u64 {
        self.per_bin.get(&bin).copied().unwrap_or_default()
    }
}

/// [`ScanStats`] bound to the file they are saved in.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    stats: ScanStats,
}

impl StatsStore {
    /// Load statistics from `path`, starting empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StatsError`] when the file cannot be read or is malformed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StatsError> {
        let path = path.into();
        let stats = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no statistics yet");
                ScanStats::default()
            }
            Err(source) => return Err(StatsError::Io { path, source }),
        };
        Ok(Self { path, stats })
    }

    /// Current totals.
    #[must_use]
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// File the totals are saved in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count one item sent to `bin` and save.
    ///
    /// The in-memory totals only change once the file has been written.
    ///
    /// # Errors
    ///
    /// Returns a [`StatsError`] when the file cannot be written.
    pub fn record(&mut self, bin: Bin, at: DateTime<Utc>) -> Result<&ScanStats, StatsError> {
        let mut updated = self.stats.clone();
        updated.items_scanned = updated.items_scanned.saturating_add(1);
        let count = updated.per_bin.entry(bin).or_default();
        *count = count.saturating_add(1);
        updated.last_scan = Some(at);

        self.save(&updated)?;
        self.stats = updated;
        Ok(&self.stats)
    }

    fn save(&self, stats: &ScanStats) -> Result<(), StatsError> {
        let io_error = |source| StatsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, json).map_err(io_error)?;

        debug!(path = %self.path.display(), items = stats.items_scanned, "saved statistics");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = StatsStore::open(dir.path().join("stats.json")).expect("open succeeds");
        assert_eq!(store.stats(), &ScanStats::default());
    }

    #[test]
    fn records_survive_reopening() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("stats.json");
        let at = Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).single().expect("valid time");

        let mut store = StatsStore::open(&path).expect("open succeeds");
        store.record(Bin::Recyclables, at).expect("record succeeds");
        store.record(Bin::Recyclables, at).expect("record succeeds");
        store.record(Bin::Glass, at).expect("record succeeds");

        let reopened = StatsStore::open(&path).expect("reopen succeeds");
        let stats = reopened.stats();
        assert_eq!(stats.items_scanned, 3);
        assert_eq!(stats.count_for(Bin::Recyclables), 2);
        assert_eq!(stats.count_for(Bin::Glass), 1);
        assert_eq!(stats.count_for(Bin::Compost), 0);
        assert_eq!(stats.last_scan, Some(at));
    }

    #[test]
    fn failed_save_leaves_totals_unchanged() {
        let dir = tempfile::tempdir().expect("temp dir");
        // a directory where the file should be makes the write fail
        let path = dir.path().join("stats.json");
        let at = Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).single().expect("valid time");

        let mut store = StatsStore::open(&path).expect("open succeeds");
        fs::create_dir(&path).expect("create dir succeeds");

        let err = store.record(Bin::Compost, at).expect_err("writing over a directory fails");
        assert!(matches!(err, StatsError::Io { .. }), "unexpected error {err:?}");
        assert_eq!(store.stats(), &ScanStats::default());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("stats.json");
        fs::write(&path, "not json").expect("write succeeds");

        let err = StatsStore::open(&path).expect_err("malformed file must fail");
        assert!(matches!(err, StatsError::Json(_)), "unexpected error {err:?}");
    }
}

use crate::records::error::RecordStoreError;
use crate::records::loader::load_records;
use crate::time_index::with_calendar_fields;
use crate::types::record_set::RecordSet;
use log::{info, warn};
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

/// Identifies one version of a source file: a change in either field means the
/// cached records are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceMarker {
    modified: Option<SystemTime>,
    len: u64,
}

impl SourceMarker {
    fn read(path: &Path) -> Result<Self, RecordStoreError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| RecordStoreError::SourceUnavailable(path.to_path_buf(), e))?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

struct CachedRecords {
    marker: SourceMarker,
    records: Arc<RecordSet>,
}

/// Parsed, time-indexed record sets keyed by source path.
///
/// Each entry is computed once and then only read; it is replaced when the
/// source's modification marker changes or when it is invalidated explicitly.
#[derive(Default)]
pub struct RecordCache {
    entries: Mutex<HashMap<PathBuf, CachedRecords>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records for `path`, loading them if absent or stale.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<RecordSet>, RecordStoreError> {
        let marker = SourceMarker::read(path)?;

        {
            let cache = self.lock();
            if let Some(cached) = cache.get(path) {
                if cached.marker == marker {
                    info!("Cache hit for climate records at {:?}", path);
                    return Ok(Arc::clone(&cached.records));
                }
                warn!(
                    "Climate source {:?} changed since it was cached. Reloading.",
                    path
                );
            } else {
                warn!("Cache miss for climate records at {:?}. Loading.", path);
            }
        }

        let records = Arc::new(with_calendar_fields(load_records(path)?));

        let mut cache = self.lock();
        match cache.entry(path.to_path_buf()) {
            Entry::Occupied(mut entry) if entry.get().marker != marker => {
                entry.insert(CachedRecords {
                    marker,
                    records: Arc::clone(&records),
                });
                Ok(records)
            }
            Entry::Occupied(entry) => Ok(Arc::clone(&entry.get().records)),
            Entry::Vacant(entry) => {
                entry.insert(CachedRecords {
                    marker,
                    records: Arc::clone(&records),
                });
                Ok(records)
            }
        }
    }

    /// Drops the cached records for `path`. Returns whether an entry existed.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.lock().remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, CachedRecords>> {
        // Entries are only ever replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SOURCE: &str = "LOCALIDAD,FECHA,PRECIP,TMAX,TMIN\n\
                          Atlautla,01/01/2020,1,20,5\n\
                          Atlautla,02/01/2020,2,21,6\n";

    #[test]
    fn test_second_access_is_shared() -> Result<(), RecordStoreError> {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("clima.csv");
        fs::write(&path, SOURCE).expect("write source");

        let cache = RecordCache::new();
        let first = cache.get_or_load(&path)?;
        let second = cache.get_or_load(&path)?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        // The cache hands out time-indexed records.
        assert_eq!(first.observations()[0].year(), Some(2020));
        Ok(())
    }

    #[test]
    fn test_changed_source_is_reloaded() -> Result<(), RecordStoreError> {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("clima.csv");
        fs::write(&path, SOURCE).expect("write source");

        let cache = RecordCache::new();
        let before = cache.get_or_load(&path)?;
        assert_eq!(before.len(), 2);

        let grown = format!("{}Atlautla,03/01/2020,3,22,7\n", SOURCE);
        fs::write(&path, grown).expect("rewrite source");

        let after = cache.get_or_load(&path)?;
        assert_eq!(after.len(), 3);
        assert_eq!(before.len(), 2, "earlier handles are never mutated");
        Ok(())
    }

    #[test]
    fn test_invalidate_forces_reload() -> Result<(), RecordStoreError> {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("clima.csv");
        fs::write(&path, SOURCE).expect("write source");

        let cache = RecordCache::new();
        let first = cache.get_or_load(&path)?;
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        assert!(cache.is_empty());

        let second = cache.get_or_load(&path)?;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        Ok(())
    }

    #[test]
    fn test_missing_source_is_not_cached() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let cache = RecordCache::new();
        let result = cache.get_or_load(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(RecordStoreError::SourceUnavailable(..))));
        assert!(cache.is_empty());
    }
}

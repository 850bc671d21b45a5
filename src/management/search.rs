use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    Res, SyncError,
    management::{SEARCH_RECORDS_FILE, read_json, write_json},
    reconcile::RecordIndex,
    types::{EntityKind, SearchRecord},
};

/// The search-record snapshot, held as a map while a stage runs and
/// persisted as a plain array.
pub struct SearchRecordManager {
    root: PathBuf,
    records: RecordIndex,
}

impl SearchRecordManager {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            records: RecordIndex::new(),
        }
    }

    /// Loads the snapshot, or starts empty when none was written yet.
    pub async fn load_or_default(root: &Path) -> Res<Self> {
        match Self::load(root).await {
            Ok(manager) => Ok(manager),
            Err(SyncError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Self::new(root)),
            Err(e) => Err(e),
        }
    }

    pub async fn load(root: &Path) -> Res<Self> {
        let records: Vec<SearchRecord> = read_json(&Self::snapshot_path(root)).await?;
        let mut manager = Self::new(root);
        for record in records {
            manager.insert(record);
        }
        Ok(manager)
    }

    pub async fn persist(&self) -> Res<()> {
        let records: Vec<&SearchRecord> = self.records.values().collect();
        write_json(&Self::snapshot_path(&self.root), &records).await
    }

    pub fn contains(&self, kind: EntityKind, id: u64) -> bool {
        self.records.contains_key(&(kind, id))
    }

    pub fn get(&self, kind: EntityKind, id: u64) -> Option<&SearchRecord> {
        self.records.get(&(kind, id))
    }

    /// Keeps the first record per `(kind, id)`; returns whether `record` was
    /// stored.
    pub fn insert(&mut self, record: SearchRecord) -> bool {
        let key = record.key();
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, record);
        true
    }

    pub fn index(&self) -> &RecordIndex {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn snapshot_path(root: &Path) -> PathBuf {
        root.join(SEARCH_RECORDS_FILE)
    }
}

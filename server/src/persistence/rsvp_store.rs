use super::json_store::{JsonStore, Storable};
use super::traits::RsvpRepository;
use super::{now_millis, PersistenceError};
use crate::rsvp::{RsvpFields, RsvpRecord};
use std::path::{Path, PathBuf};

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE: &str = "rsvps.json";

impl Storable for RsvpRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Snapshot-file implementation of [`RsvpRepository`]: the whole collection
/// lives in one JSON array, rewritten on every mutation.
pub struct RsvpStore {
    inner: JsonStore<RsvpRecord>,
}

impl RsvpStore {
    /// Create a store backed by `<data_dir>/rsvps.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self::new_at(data_dir.join(SNAPSHOT_FILE))
    }

    pub fn new_at(path: PathBuf) -> Self {
        Self {
            inner: JsonStore::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl RsvpRepository for RsvpStore {
    async fn list_all(&self) -> Vec<RsvpRecord> {
        match self.inner.load_all().await {
            Ok(mut records) => {
                // File order is insertion order; the stable sort only matters
                // when two creates raced for the lock.
                records.sort_by_key(|r| r.created_at);
                records
            }
            Err(e) => {
                tracing::error!(path = %self.path().display(), error = %e, "Failed to read RSVP snapshot");
                vec![]
            }
        }
    }

    async fn insert(&self, record: &RsvpRecord) -> Result<(), PersistenceError> {
        self.inner.insert(record).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RsvpRecord>, PersistenceError> {
        self.inner.load(id).await
    }

    async fn update(
        &self,
        id: &str,
        fields: &RsvpFields,
    ) -> Result<Option<RsvpRecord>, PersistenceError> {
        let fields = fields.clone();
        self.inner
            .modify(id, move |record| record.apply(fields, now_millis()))
            .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, PersistenceError> {
        self.inner.delete(id).await
    }
}

use super::PersistenceError;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Trait for types that can be persisted in a JsonStore.
pub trait Storable: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn id(&self) -> &str;
}

/// Generic whole-file JSON snapshot store.
///
/// The collection lives in a single pretty-printed JSON array and is
/// rewritten on every mutation. All access goes through `lock`, which is held
/// for the full read → modify → write span, so concurrent writers can never
/// drop each other's changes. Writes go to a sibling temp file that is then
/// renamed over the target.
pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _phantom: PhantomData<T>,
}

impl<T: Storable> JsonStore<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order.
    pub async fn load_all(&self) -> Result<Vec<T>, PersistenceError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Load a record by id. Returns None if not found.
    pub async fn load(&self, id: &str) -> Result<Option<T>, PersistenceError> {
        let _guard = self.lock.lock().await;
        let items = self.read().await?;
        Ok(items.into_iter().find(|item| item.id() == id))
    }

    /// Append a record, rejecting ids that are already present.
    pub async fn insert(&self, data: &T) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        if items.iter().any(|item| item.id() == data.id()) {
            return Err(PersistenceError::DuplicateId(data.id().to_string()));
        }
        items.push(data.clone());
        self.write(&items).await
    }

    /// Apply `edit` to the record with this id and persist the result.
    /// Returns the edited record, or None (without touching the file) if the
    /// id is unknown.
    pub async fn modify<F>(&self, id: &str, edit: F) -> Result<Option<T>, PersistenceError>
    where
        F: FnOnce(&mut T) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        edit(item);
        let edited = item.clone();
        self.write(&items).await?;
        Ok(Some(edited))
    }

    /// Delete a record by id. Returns whether a record was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(&items).await?;
        Ok(true)
    }

    /// Read the snapshot. A missing or blank file is an empty collection.
    async fn read(&self) -> Result<Vec<T>, PersistenceError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write(&self, items: &[T]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

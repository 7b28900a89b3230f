use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::{api::error, constants::STORAGE_FILE_NAME, ENV};

pub fn open_storage() -> Result<LocalStorage, error::SystemError> {
    match ENV.data_dir.as_deref() {
        Some(dir) => LocalStorage::open(dir),
        None => {
            log::warn!("DATA_DIR not set, storage will not survive a restart");
            Ok(LocalStorage::in_memory())
        }
    }
}

/// String key-value storage, the stand-in for the browser's `localStorage`.
///
/// Values are JSON documents kept as strings. A file-backed storage rewrites
/// its whole file on every write, and a write only becomes visible once that
/// file is on disk.
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: RwLock<BTreeMap<String, String>>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self { path: None, entries: RwLock::new(BTreeMap::new()) }
    }

    pub fn open(dir: impl AsRef<Path>) -> Result<Self, error::SystemError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(STORAGE_FILE_NAME);

        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                log::warn!("Storage file {} is malformed, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        log::info!("Storage opened at {} ({} keys)", path.display(), entries.len());
        Ok(Self { path: Some(path), entries: RwLock::new(entries) })
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: String) -> Result<(), error::SystemError> {
        let mut entries = self.write_entries();
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.commit(&mut entries, next)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), error::SystemError> {
        let mut entries = self.write_entries();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.commit(&mut entries, next)
    }

    pub fn get<T>(&self, key: &str) -> Result<Option<T>, error::SystemError>
    where
        T: DeserializeOwned,
    {
        match self.get_item(key) {
            Some(v) => {
                let parsed = serde_json::from_str(&v)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub fn set<T>(&self, key: &str, value: &T) -> Result<(), error::SystemError>
    where
        T: Serialize,
    {
        let serialized = serde_json::to_string(value)?;
        self.set_item(key, serialized)
    }

    /// Reads the document under `key`, falling back to `T::default()` when it
    /// is missing or cannot be parsed.
    pub fn load_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.get_item(key) {
            Some(raw) => parse_or_default(key, &raw),
            None => T::default(),
        }
    }

    /// Read-modify-write of the document under `key`, holding the write lock
    /// for the whole cycle.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Result<R, error::SystemError>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> R,
    {
        let mut entries = self.write_entries();
        let mut value: T = match entries.get(key) {
            Some(raw) => parse_or_default(key, raw),
            None => T::default(),
        };

        let result = f(&mut value);

        let mut next = entries.clone();
        next.insert(key.to_string(), serde_json::to_string(&value)?);
        self.commit(&mut entries, next)?;
        Ok(result)
    }

    /// Removes every key starting with `prefix`, returning how many were removed.
    pub fn clear_prefix(&self, prefix: &str) -> Result<usize, error::SystemError> {
        let mut entries = self.write_entries();
        let mut next = entries.clone();
        next.retain(|key, _| !key.starts_with(prefix));
        let removed = entries.len() - next.len();
        if removed > 0 {
            self.commit(&mut entries, next)?;
        }
        Ok(removed)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swaps `next` in only after it reached the file.
    fn commit(
        &self,
        entries: &mut BTreeMap<String, String>,
        next: BTreeMap<String, String>,
    ) -> Result<(), error::SystemError> {
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), error::SystemError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(entries)?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn parse_or_default<T>(key: &str, raw: &str) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("Discarding malformed value under {}: {}", key, e);
        T::default()
    })
}

//! JSON file-backed key/value store.
//!
//! All keys live in one JSON object on disk. Every read goes to the file so
//! that a background invocation in another process always sees the latest
//! committed state; nothing is cached in memory.
//!
//! # Atomicity
//!
//! Every write goes to its own uniquely named temp file in the same directory,
//! which is then renamed over the state file, so readers observe either the
//! old or the new object, never a torn one. Two stores on the same path (for
//! example a foreground and a background process) never share a temp file.
//!
//! Within a process, writers are serialized by an async mutex so concurrent
//! read-modify-write cycles do not lose keys. Across processes there is no
//! lock: each write rewrites the whole object it read, so a write that lands
//! between another process's read and rename is overwritten. A concurrent
//! `clear_arming` can be undone this way, which widens the accepted
//! foreground/background race to at most one repeat alert. Writes that would
//! not change any value skip the rewrite entirely, so re-saving unchanged
//! state never resurrects an older object.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::traits::{BoxFuture, KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

/// [`KeyValueStore`] persisted as a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store at the given path.
    ///
    /// The file and its parent directories are created on first write; a
    /// missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    async fn read_entries(&self) -> Result<Entries, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let directory = self.directory();
        tokio::fs::create_dir_all(&directory).await?;

        let json = serde_json::to_string_pretty(entries)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&directory, &path, json.as_bytes()))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;

        debug!(path = %self.path.display(), keys = entries.len(), "State file written");
        Ok(())
    }

    async fn update<F>(&self, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Entries) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        let changed = mutate(&mut entries);
        if changed {
            self.write_entries(&entries).await?;
        }
        Ok(changed)
    }
}

/// Insert `value`, reporting whether the stored value changed.
fn set_entry(entries: &mut Entries, key: String, value: String) -> bool {
    if entries.get(&key) == Some(&value) {
        return false;
    }
    entries.insert(key, value);
    true
}

/// Write `contents` to a fresh temp file in `directory` and rename it over `path`.
///
/// The temp file is removed if anything fails before the rename.
fn replace_file(directory: &Path, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut temp = NamedTempFile::new_in(directory)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| {
        warn!(path = %path.display(), error = %e.error, "State file rename failed");
        StoreError::Io(e.error)
    })?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<String>, StoreError>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut entries = self.read_entries().await?;
            Ok(entries.remove(&key))
        })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'_, Result<(), StoreError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.update(move |entries| set_entry(entries, key, value))
                .await?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, Result<bool, StoreError>> {
        let key = key.to_string();
        Box::pin(async move { self.update(move |entries| entries.remove(&key).is_some()).await })
    }

    /// Commits every entry in one file replacement.
    fn set_many(&self, batch: Vec<(String, String)>) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            self.update(move |entries| {
                batch
                    .into_iter()
                    .fold(false, |changed, (key, value)| {
                        set_entry(entries, key, value) | changed
                    })
            })
            .await?;
            Ok(())
        })
    }
}

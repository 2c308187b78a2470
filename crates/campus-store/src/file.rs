//! File-backed substrate: one JSON document per key.

use crate::error::StoreError;
use crate::traits::KeyValueStore;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Options for the file-backed substrate.
#[derive(Debug, Clone)]
pub struct FileStoreOptions {
    /// Whether to fsync after each write (default: false).
    pub sync: bool,
    /// Whether to create the root directory if it doesn't exist (default: true).
    pub create: bool,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
        }
    }
}

/// Substrate storing each key as `<root>/<key>.json`.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a reader sees either the old or the new value, never a
/// partial one.
///
/// # Example
///
/// ```rust
/// use campus_store::{FileStore, FileStoreOptions, KeyValueStore};
///
/// let dir = tempfile::tempdir()?;
/// let store = FileStore::open(dir.path(), FileStoreOptions::default())?;
/// store.set("uni_session", "valid")?;
/// assert_eq!(store.get("uni_session")?.as_deref(), Some("valid"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    sync: bool,
}

impl FileStore {
    /// Opens a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory is missing and
    /// `options.create` is false, or if it cannot be created.
    pub fn open<P: AsRef<Path>>(root: P, options: FileStoreOptions) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        if options.create {
            fs::create_dir_all(&root)?;
        } else if !root.is_dir() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("store directory does not exist: {}", root.display()),
            )));
        }
        Ok(Self {
            root,
            sync: options.sync,
        })
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            if self.sync {
                file.sync_all()?;
            }
        }
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "wrote document");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

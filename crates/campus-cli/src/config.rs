//! Runtime configuration shared by all commands.

use campus_access::SessionManager;
use campus_store::{FileStore, FileStoreOptions, SharedStore, StoreError};
use std::path::PathBuf;
use std::rc::Rc;

/// Resolved global options.
pub struct Config {
    pub data_dir: PathBuf,
    pub sync: bool,
}

impl Config {
    /// Opens the file-backed substrate under the data directory.
    pub fn open_store(&self) -> Result<SharedStore, StoreError> {
        let options = FileStoreOptions {
            sync: self.sync,
            ..FileStoreOptions::default()
        };
        let store = FileStore::open(&self.data_dir, options)?;
        tracing::debug!(root = %store.root().display(), "opened data directory");
        Ok(Rc::new(store))
    }

    /// Opens the store and restores the persisted session.
    pub fn session(&self) -> Result<(SharedStore, SessionManager), StoreError> {
        let kv = self.open_store()?;
        let manager = SessionManager::restored(kv.clone());
        Ok((kv, manager))
    }
}

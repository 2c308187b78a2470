//! Storage substrate trait.

use crate::error::StoreError;
use std::rc::Rc;

/// Durable string key-value store scoped to the local client.
///
/// Each call is all-or-nothing. Methods take `&self`; implementations use
/// interior mutability so one substrate can back several collections.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Handle to a substrate shared by the collections of one process.
pub type SharedStore = Rc<dyn KeyValueStore>;

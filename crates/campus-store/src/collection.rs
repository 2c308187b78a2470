use crate::error::StoreError;
use crate::traits::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads the collection stored under `key`.
///
/// Returns `Ok(None)` when the key is absent and [`StoreError::Malformed`]
/// when the stored text does not parse.
pub fn read<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<Vec<T>>, StoreError> {
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Serializes the whole collection and stores it under `key`.
pub fn write<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(items)?;
    store.set(key, &text)?;
    tracing::debug!(key, count = items.len(), "persisted collection");
    Ok(())
}

/// Loads a collection, reseeding it when it is missing or unreadable.
///
/// Read failures never propagate: the seed is returned and written back. A
/// failed write-back is logged and the seed is still used in memory.
pub fn load_or_seed<T, F>(store: &dyn KeyValueStore, key: &str, seed: F) -> Vec<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match read(store, key) {
        Ok(Some(items)) => {
            tracing::debug!(key, count = items.len(), "loaded collection");
            return items;
        }
        Ok(None) => tracing::debug!(key, "collection missing, seeding defaults"),
        Err(e) => tracing::warn!(key, error = %e, "unreadable collection, reseeding defaults"),
    }
    let items = seed();
    if let Err(e) = write(store, key, &items) {
        tracing::warn!(key, error = %e, "failed to write seeded collection");
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn malformed_text_is_reported_with_key() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let err = read::<u32>(&store, "k").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { ref key, .. } if key == "k"));
    }

    #[test]
    fn load_or_seed_writes_seed_back() {
        let store = MemoryStore::new();
        let items = load_or_seed(&store, "k", || vec![1u32, 2, 3]);
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(read::<u32>(&store, "k").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn load_or_seed_replaces_garbage() {
        let store = MemoryStore::new();
        store.set("k", "garbage").unwrap();
        let items = load_or_seed(&store, "k", || vec![7u32]);
        assert_eq!(items, vec![7]);
        assert_eq!(read::<u32>(&store, "k").unwrap(), Some(vec![7]));
    }

    #[test]
    fn load_or_seed_keeps_existing_data() {
        let store = MemoryStore::new();
        write(&store, "k", &[9u32]).unwrap();
        let items = load_or_seed(&store, "k", || vec![1u32]);
        assert_eq!(items, vec![9]);
    }
}

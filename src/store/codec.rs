//! JSON codec at the persistence boundary.
//!
//! Set-valued fields (`uniqueActorsFound`, `moviesWatched`) are `BTreeSet`s in
//! memory and JSON arrays on disk. Decoding an array with duplicates collapses
//! them, so a hand-edited or legacy document still loads.

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::error::StoreError;

pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

pub fn decode<T: DeserializeOwned>(key: &str, contents: &str) -> Result<T, StoreError> {
    serde_json::from_str(contents).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(contents) => decode(key, &contents).map(Some),
        None => Ok(None),
    }
}

/// Loads `key`, falling back to `T::default()` when it is missing, unreadable
/// or corrupt.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(target: "store", "Resetting {} to defaults: {}", key, e);
            T::default()
        }
    }
}

pub fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let contents = encode(key, value)?;
    store.set(key, &contents)
}

/// Best-effort save: a failure is logged and reported as `false`.
pub fn save_logged<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match save(store, key, value) {
        Ok(()) => true,
        Err(e) => {
            error!(target: "store", "Dropping write: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::BTreeSet;

    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        ids: BTreeSet<u64>,
    }

    #[test]
    fn test_sets_are_encoded_as_arrays() {
        let sample = Sample {
            ids: [3, 1, 2].into_iter().collect(),
        };
        assert_eq!(encode("sample", &sample).unwrap(), r#"{"ids":[1,2,3]}"#);
    }

    #[test]
    fn test_duplicate_array_entries_collapse_into_set() {
        let sample: Sample = decode("sample", r#"{"ids":[5,5,7]}"#).unwrap();
        assert_eq!(sample.ids.len(), 2);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set("sample", "{not json").unwrap();

        assert!(matches!(
            load::<Sample>(&store, "sample"),
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(load_or_default::<Sample>(&store, "sample"), Sample::default());
    }

    #[test]
    fn test_save_logged_reports_failure() {
        let store = MemoryStore::new();
        store.set_read_only(true);
        assert!(!save_logged(&store, "sample", &Sample::default()));

        store.set_read_only(false);
        assert!(save_logged(&store, "sample", &Sample::default()));
        assert!(store.get("sample").unwrap().is_some());
    }
}

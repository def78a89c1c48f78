pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::model::StorageError;
use std::collections::HashSet;

/// Key under which the favorite ids are persisted.
pub const FAVORITES_KEY: &str = "favorites";

/// Plain string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Load/save capability for the favorites set.
pub trait FavoritesBackend {
    fn load(&self) -> Result<HashSet<String>, StorageError>;
    fn save(&mut self, favorites: &HashSet<String>) -> Result<(), StorageError>;
}

/// Favorites are stored as a JSON list of ids. An absent key means no
/// favorites, and an empty set removes the key instead of storing `[]`.
impl<T: KeyValueStore> FavoritesBackend for T {
    fn load(&self) -> Result<HashSet<String>, StorageError> {
        match self.get(FAVORITES_KEY)? {
            Some(raw) => decode_favorites(&raw),
            None => Ok(HashSet::new()),
        }
    }

    fn save(&mut self, favorites: &HashSet<String>) -> Result<(), StorageError> {
        match encode_favorites(favorites)? {
            Some(raw) => self.set(FAVORITES_KEY, &raw),
            None => self.remove(FAVORITES_KEY),
        }
    }
}

/// Sorted so the stored text only changes when the set does.
pub fn encode_favorites(favorites: &HashSet<String>) -> Result<Option<String>, StorageError> {
    if favorites.is_empty() {
        return Ok(None);
    }
    let mut ids: Vec<&String> = favorites.iter().collect();
    ids.sort();
    Ok(Some(serde_json::to_string(&ids)?))
}

pub fn decode_favorites(raw: &str) -> Result<HashSet<String>, StorageError> {
    let ids: Vec<String> = serde_json::from_str(raw)?;
    Ok(ids.into_iter().collect())
}

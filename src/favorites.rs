use crate::storage::FavoritesBackend;
use std::collections::HashSet;
use tracing::{info, warn};

/// Set of favorited product ids, written through to the backend on every change.
///
/// Ids are not checked against the catalog: a favorite whose product is gone
/// after re-ingestion simply never shows up.
pub struct FavoritesStore<B: FavoritesBackend> {
    ids: HashSet<String>,
    backend: B,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    /// Reads the persisted set once. Missing or unreadable data starts empty.
    pub fn load(backend: B) -> Self {
        let ids = match backend.load() {
            Ok(ids) => {
                info!("Loaded {} favorites", ids.len());
                ids
            }
            Err(e) => {
                warn!("Failed to load favorites, starting empty: {}", e);
                HashSet::new()
            }
        };

        Self { ids, backend }
    }

    /// Flips membership of `id` and persists the result. Returns whether the
    /// id is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };

        if let Err(e) = self.backend.save(&self.ids) {
            warn!("Failed to save favorites: {}", e);
        }
        now_favorite
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

use crate::analyzer::{derive_bounds, QueryCache};
use crate::favorites::FavoritesStore;
use crate::fetcher::SourceFetcher;
use crate::ingest::{fetch_and_merge, SourceReport};
use crate::model::{CatalogBounds, Product, SourceLocation, ViewMode};
use crate::parser::Parser;
use crate::state::app_state::{AppState, Event, ReduceContext};
use crate::storage::FavoritesBackend;
use tracing::{debug, info, warn};

/// Owns the merged collection and everything derived from it. All mutation
/// goes through [`Catalog::handle`], [`Catalog::begin_load`] and
/// [`Catalog::finish_load`] on a single thread.
pub struct Catalog<B: FavoritesBackend> {
    products: Vec<Product>,
    bounds: CatalogBounds,
    state: AppState,
    cache: QueryCache,
    favorites: FavoritesStore<B>,
}

impl<B: FavoritesBackend> Catalog<B> {
    pub fn new(favorites: FavoritesStore<B>, page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            bounds: CatalogBounds::default(),
            state: AppState::new(page_size),
            cache: QueryCache::new(),
            favorites,
        }
    }

    pub fn handle(&mut self, event: Event) {
        debug!("Handling event: {:?}", event);
        if let Event::FavoriteToggled(id) = &event {
            let now_favorite = self.favorites.toggle(id);
            info!("Favorite {} -> {}", id, now_favorite);
        }

        let result_len = self.result_len();
        let ctx = ReduceContext {
            result_len,
            bounds: &self.bounds,
        };
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(&event, &ctx);
    }

    /// Marks a load as in flight. Returns `false` if one already is.
    pub fn begin_load(&mut self) -> bool {
        if self.state.loading {
            warn!("Load already in progress, ignoring request");
            return false;
        }
        self.handle(Event::LoadStarted);
        true
    }

    /// Installs a freshly merged collection and recomputes derived values.
    pub fn finish_load(&mut self, products: Vec<Product>) {
        self.bounds = derive_bounds(&products);
        self.products = products;
        self.cache.invalidate();
        self.handle(Event::LoadFinished);
        info!(
            "Catalog ready: {} products, prices {:.2}-{:.2}, {} colours",
            self.products.len(),
            self.bounds.min_price,
            self.bounds.max_price,
            self.bounds.unique_colours.len()
        );
    }

    /// Full fetch-and-merge cycle. Returns `None` when a load was already running.
    pub async fn load<F, P>(
        &mut self,
        fetcher: &F,
        parser: &P,
        sources: &[SourceLocation],
    ) -> Option<Vec<SourceReport>>
    where
        F: SourceFetcher + ?Sized,
        P: Parser,
    {
        if !self.begin_load() {
            return None;
        }
        let outcome = fetch_and_merge(fetcher, parser, sources).await;
        self.finish_load(outcome.products);
        Some(outcome.sources)
    }

    /// Filtered and sorted records, before pagination.
    pub fn result(&mut self) -> Vec<&Product> {
        let indices = self.cache.get_or_compute(&self.products, &self.state.criteria);
        indices.iter().map(|&i| &self.products[i]).collect()
    }

    pub fn result_len(&mut self) -> usize {
        self.cache
            .get_or_compute(&self.products, &self.state.criteria)
            .len()
    }

    /// Favorited records present in the current result, in result order.
    pub fn favorite_result(&mut self) -> Vec<&Product> {
        let indices = self.cache.get_or_compute(&self.products, &self.state.criteria);
        indices
            .iter()
            .map(|&i| &self.products[i])
            .filter(|p| self.favorites.is_favorite(&p.id))
            .collect()
    }

    /// What the list shows: the paginated window in catalog view, or every
    /// matching favorite in favorites view.
    pub fn visible(&mut self) -> Vec<&Product> {
        match self.state.view {
            ViewMode::Favorites => self.favorite_result(),
            ViewMode::Catalog => {
                let pagination = self.state.pagination;
                let indices = self.cache.get_or_compute(&self.products, &self.state.criteria);
                pagination
                    .window(indices)
                    .iter()
                    .map(|&i| &self.products[i])
                    .collect()
            }
        }
    }

    pub fn summary(&mut self) -> String {
        match self.state.view {
            ViewMode::Favorites => {
                format!("{} products found in favorites", self.favorite_result().len())
            }
            ViewMode::Catalog => format!("{} products found", self.result_len()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn bounds(&self) -> &CatalogBounds {
        &self.bounds
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }
}

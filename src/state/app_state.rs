// UI state and its transitions
use crate::model::{CatalogBounds, CriteriaPatch, FilterCriteria, PriceRange, ViewMode};
use crate::pagination::Pagination;

/// Triggers emitted by the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CriteriaChanged(CriteriaPatch),
    /// The user scrolled close to the end of the visible window.
    NearBottom,
    FavoriteToggled(String),
    ViewModeChanged(ViewMode),
    /// Heart button in the header: flips between catalog and favorites.
    ToggleFavoritesView,
    /// Clears all selections and opens the price range to the catalog bounds.
    ResetFilters,
    LoadStarted,
    LoadFinished,
}

/// Values the reducer reads but does not own.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub result_len: usize,
    pub bounds: &'a CatalogBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub criteria: FilterCriteria,
    pub pagination: Pagination,
    pub view: ViewMode,
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Pagination::default().page_size())
    }
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            pagination: Pagination::new(page_size),
            view: ViewMode::Catalog,
            loading: false,
        }
    }

    /// Pure transition. Favorite toggles leave this state alone; they only
    /// touch the favorites store.
    pub fn apply(self, event: &Event, ctx: &ReduceContext) -> Self {
        match event {
            Event::CriteriaChanged(patch) => {
                let criteria = self.criteria.clone().apply(patch.clone());
                self.with_criteria(criteria)
            }
            Event::NearBottom => {
                let mut next = self;
                if next.view == ViewMode::Catalog {
                    next.pagination.load_more(ctx.result_len, next.loading);
                }
                next
            }
            Event::FavoriteToggled(_) => self,
            Event::ViewModeChanged(mode) => self.with_view(*mode),
            Event::ToggleFavoritesView => {
                let mode = match self.view {
                    ViewMode::Catalog => ViewMode::Favorites,
                    ViewMode::Favorites => ViewMode::Catalog,
                };
                self.with_view(mode)
            }
            Event::ResetFilters => {
                let mut criteria = self.criteria.clone().cleared_selections();
                criteria.price_range = PriceRange::new(ctx.bounds.min_price, ctx.bounds.max_price);
                self.with_criteria(criteria)
            }
            Event::LoadStarted => Self {
                loading: true,
                ..self
            },
            Event::LoadFinished => {
                let mut next = Self {
                    loading: false,
                    ..self
                };
                next.pagination.reset();
                next
            }
        }
    }

    fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.pagination.reset();
        }
        self
    }

    /// Switching views drops brand, category, colour and price selections;
    /// the search text and sort order carry over.
    fn with_view(mut self, mode: ViewMode) -> Self {
        if mode == self.view {
            return self;
        }
        self.view = mode;
        self.criteria = self.criteria.cleared_selections();
        self.pagination.reset();
        self
    }
}

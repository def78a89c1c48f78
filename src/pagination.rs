/// Products shown per "page" of the growing window.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Page counter for the visible window. The window is always a prefix of the
/// current result: the first `page * page_size` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn window_len(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.window_len(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.window_len(total) < total
    }

    /// Advances by exactly one page. No-op once the window covers the whole
    /// result, or while a load is in flight. Returns whether the page moved.
    pub fn load_more(&mut self, total: usize, loading: bool) -> bool {
        if loading || !self.has_more(total) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

// Analyzer module: the query pipeline and the values derived from the whole catalog.

pub mod bounds;
pub mod cache;
pub mod query;

pub use bounds::derive_bounds;
pub use cache::QueryCache;
pub use query::{discount_amount, filter_sort, filter_sort_indices};

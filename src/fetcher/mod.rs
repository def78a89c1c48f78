pub mod fetcher;
pub mod traits;

pub use fetcher::{FetcherImpl, FileFetcher, HttpFetcher};
pub use traits::SourceFetcher;

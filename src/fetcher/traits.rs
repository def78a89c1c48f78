use crate::model::{FetchError, SourceLocation};

/// Retrieves the raw text of one CSV source.
#[async_trait::async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError>;
}

use crate::model::{FetchError, SourceLocation};
use crate::fetcher::traits::SourceFetcher;

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Reads sources from the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FileFetcher;

#[async_trait::async_trait]
impl SourceFetcher for FileFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        let SourceLocation::File(path) = location else {
            return Err(FetchError::Io {
                location: location.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file source"),
            });
        };

        debug!("Reading {}", path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                location: location.to_string(),
                source,
            })
    }
}

/// Downloads sources from a static file server.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    pub client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("petite-catalog/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        let url = match location {
            SourceLocation::Http(url) => url,
            SourceLocation::File(path) => {
                return Err(FetchError::Io {
                    location: location.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("{} is not an HTTP source", path.display()),
                    ),
                });
            }
        };

        debug!("Requesting {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                location: url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Dispatches each location to the matching transport.
#[derive(Debug, Clone)]
pub struct FetcherImpl {
    pub file: FileFetcher,
    pub http: HttpFetcher,
}

impl FetcherImpl {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            file: FileFetcher,
            http: HttpFetcher::new(timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl SourceFetcher for FetcherImpl {
    async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
        match location {
            SourceLocation::File(_) => self.file.fetch(location).await,
            SourceLocation::Http(_) => self.http.fetch(location).await,
        }
    }
}

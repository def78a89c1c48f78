use crate::model::{ConfigError, SourceLocation};
use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Ordered source locations; products are merged in this order.
    pub sources: Vec<String>,
    /// When set, relative sources are fetched from this static file server.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_database_path() -> PathBuf {
    PathBuf::from("favorites.db")
}

fn default_request_timeout() -> u64 {
    10
}

impl AppConfig {
    /// Resolves each configured source to a concrete location.
    pub fn source_locations(&self) -> Vec<SourceLocation> {
        self.sources
            .iter()
            .map(|source| resolve_source(source, self.base_url.as_deref(), &self.data_dir))
            .collect()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if let Some(blank) = self.sources.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("blank source entry {:?}", blank)));
        }
        Ok(self)
    }
}

pub fn resolve_source(source: &str, base_url: Option<&str>, data_dir: &Path) -> SourceLocation {
    let source = source.trim();
    if source.starts_with("http://") || source.starts_with("https://") {
        return SourceLocation::Http(source.to_string());
    }

    let relative = source.trim_start_matches('/');
    match base_url {
        Some(base) => SourceLocation::Http(format!("{}/{}", base.trim_end_matches('/'), relative)),
        None => SourceLocation::File(data_dir.join(relative)),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        let config = parse_config(r#"{ "sources": ["/matalan-2024-11-21.csv"] }"#).unwrap();
        assert_eq!(config.page_size, 40);
        assert_eq!(config.database_path, PathBuf::from("favorites.db"));
        assert_eq!(
            config.source_locations(),
            vec![SourceLocation::File(PathBuf::from("data/matalan-2024-11-21.csv"))]
        );
    }

    #[test]
    fn relative_sources_use_base_url_when_set() {
        let config = parse_config(
            r#"{
                "sources": ["/relr-2024-11-26.csv", "boohoo.csv", "https://cdn.example/x.csv"],
                "base_url": "http://localhost:5173/"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.source_locations(),
            vec![
                SourceLocation::Http("http://localhost:5173/relr-2024-11-26.csv".into()),
                SourceLocation::Http("http://localhost:5173/boohoo.csv".into()),
                SourceLocation::Http("https://cdn.example/x.csv".into()),
            ]
        );
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = parse_config(r#"{ "sources": [], "page_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_config("{"), Err(ConfigError::Json(_))));
    }
}

// Multi-source fetch and merge
use crate::fetcher::SourceFetcher;
use crate::model::{Product, SourceLocation};
use crate::normalizer::normalize_all;
use crate::parser::Parser;
use crate::utils::{snapshot_date, source_discriminator};

use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    Loaded { rows: usize, products: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub location: SourceLocation,
    pub discriminator: String,
    pub snapshot: Option<NaiveDate>,
    pub status: SourceStatus,
}

/// Result of one ingestion run: the merged collection plus what happened to each source.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub products: Vec<Product>,
    pub sources: Vec<SourceReport>,
}

impl MergeOutcome {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources
            .iter()
            .filter(|s| matches!(s.status, SourceStatus::Failed(_)))
    }
}

/// Fetches every source, parses each one and concatenates the products in
/// the order the sources were given.
///
/// A source that cannot be fetched or parsed is skipped as a whole and
/// reported as `SourceStatus::Failed`; the other sources still load.
/// Identical garments from different sources are kept as separate entries.
pub async fn fetch_and_merge<F, P>(fetcher: &F, parser: &P, sources: &[SourceLocation]) -> MergeOutcome
where
    F: SourceFetcher + ?Sized,
    P: Parser,
{
    info!("Fetching {} sources...", sources.len());
    let bodies = join_all(sources.iter().map(|location| fetcher.fetch(location))).await;
    let discriminators = unique_discriminators(sources);

    let mut outcome = MergeOutcome::default();
    for ((location, discriminator), body) in sources.iter().zip(discriminators).zip(bodies) {
        let file_name = location.file_name();
        let parsed = body
            .map_err(|e| e.to_string())
            .and_then(|text| parser.parse(&text).map_err(|e| e.to_string()));

        let status = match parsed {
            Ok(rows) => {
                let row_count = rows.len();
                let products = normalize_all(rows, &discriminator);
                info!(
                    "Loaded {} products from {} ({} rows)",
                    products.len(),
                    location,
                    row_count
                );
                let status = SourceStatus::Loaded {
                    rows: row_count,
                    products: products.len(),
                };
                outcome.products.extend(products);
                status
            }
            Err(reason) => {
                warn!("Skipping source {}: {}", location, reason);
                SourceStatus::Failed(reason)
            }
        };

        outcome.sources.push(SourceReport {
            location: location.clone(),
            discriminator,
            snapshot: snapshot_date(&file_name),
            status,
        });
    }

    info!(
        "Merged {} products from {} sources ({} skipped)",
        outcome.products.len(),
        sources.len(),
        outcome.failed_sources().count()
    );
    outcome
}

/// One discriminator per source. Sources whose names collide (the same file
/// name in two directories, say) get a `~N` suffix, which kebab-case names
/// can never contain.
pub fn unique_discriminators(sources: &[SourceLocation]) -> Vec<String> {
    let mut used = HashSet::new();
    sources
        .iter()
        .map(|location| {
            let base = source_discriminator(&location.file_name());
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}~{}", base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchError;
    use crate::parser::CsvProductParser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct StubFetcher(HashMap<String, String>);

    #[async_trait::async_trait]
    impl SourceFetcher for StubFetcher {
        async fn fetch(&self, location: &SourceLocation) -> Result<String, FetchError> {
            self.0
                .get(&location.to_string())
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    location: location.to_string(),
                    status: 404,
                })
        }
    }

    fn file(path: &str) -> SourceLocation {
        SourceLocation::File(PathBuf::from(path))
    }

    #[test]
    fn colliding_file_names_get_distinct_discriminators() {
        let sources = vec![file("a/oasis.csv"), file("b/oasis.csv"), file("oasis~2.csv"), file("c/oasis.csv")];
        let discriminators = unique_discriminators(&sources);
        let unique: HashSet<_> = discriminators.iter().collect();
        assert_eq!(unique.len(), discriminators.len());
        assert_eq!(discriminators[0], "oasis");
        assert_eq!(discriminators[1], "oasis~2");
    }

    #[tokio::test]
    async fn merges_in_source_order_and_skips_failures() {
        let fetcher = StubFetcher(HashMap::from([
            ("one.csv".to_string(), "name,brand\nA,Oasis\nB,Boden\n".to_string()),
            ("two.csv".to_string(), "name,brand\nC,Oasis\n".to_string()),
        ]));
        let sources = vec![file("one.csv"), file("missing.csv"), file("two.csv")];

        let outcome = fetch_and_merge(&fetcher, &CsvProductParser::new(), &sources).await;

        let names: Vec<_> = outcome.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(outcome.products[2].id, "two-0");
        assert_eq!(outcome.failed_sources().count(), 1);
        assert!(matches!(outcome.sources[1].status, SourceStatus::Failed(_)));
        assert_eq!(
            outcome.sources[0].status,
            SourceStatus::Loaded { rows: 2, products: 2 }
        );
    }

    #[tokio::test]
    async fn no_sources_yields_empty_catalog() {
        let fetcher = StubFetcher(HashMap::new());
        let outcome = fetch_and_merge(&fetcher, &CsvProductParser::new(), &[]).await;
        assert!(outcome.products.is_empty());
        assert!(outcome.sources.is_empty());
    }
}

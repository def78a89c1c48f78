use petite_catalog::config::{load_config, AppConfig};
use petite_catalog::console::{handle_command, CommandOutcome};
use petite_catalog::favorites::FavoritesStore;
use petite_catalog::fetcher::FetcherImpl;
use petite_catalog::ingest::SourceStatus;
use petite_catalog::parser::CsvProductParser;
use petite_catalog::state::Catalog;
use petite_catalog::storage::{KeyValueStore, MemoryStorage, SqliteStorage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "petite_catalog=info";

#[tokio::main]
async fn main() {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());

    // Load configuration from file
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(None);
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };
    init_logging(config.log_filter.as_deref());

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let fetcher = match FetcherImpl::new(Duration::from_secs(config.request_timeout_seconds)) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };
    let parser = CsvProductParser::new();

    // Favorites survive a broken database; they just won't persist this run
    let storage: Box<dyn KeyValueStore> = match SqliteStorage::new(&config.database_path) {
        Ok(s) => Box::new(s),
        Err(e) => {
            warn!(
                "Failed to open {}: {}. Favorites will not be saved.",
                config.database_path.display(),
                e
            );
            Box::new(MemoryStorage::new())
        }
    };

    let mut catalog = Catalog::new(FavoritesStore::load(storage), config.page_size);

    let sources = config.source_locations();
    info!("Loading catalog from {} sources...", sources.len());
    if let Some(reports) = catalog.load(&fetcher, &parser, &sources).await {
        for report in reports {
            match report.status {
                SourceStatus::Loaded { rows, products } => info!(
                    "{} [{}] snapshot {}: {} of {} rows",
                    report.location,
                    report.discriminator,
                    report
                        .snapshot
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "unknown".into()),
                    products,
                    rows
                ),
                SourceStatus::Failed(reason) => warn!("{} skipped: {}", report.location, reason),
            }
        }
    }

    if let CommandOutcome::Reply(text) = handle_command("show", &mut catalog) {
        println!("{}", text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match handle_command(&line, &mut catalog) {
            CommandOutcome::Reply(text) if text.is_empty() => {}
            CommandOutcome::Reply(text) => println!("{}", text),
            CommandOutcome::Quit => break,
        }
    }

    info!("Bye.");
}

fn init_logging(filter: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.unwrap_or(DEFAULT_LOG_FILTER).into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

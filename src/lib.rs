pub mod analyzer;
pub mod config;
pub mod console;
pub mod favorites;
pub mod fetcher;
pub mod ingest;
pub mod model;
pub mod normalizer;
pub mod pagination;
pub mod parser;
pub mod state;
pub mod storage;
pub mod utils;

//! Batch pipelines over the streaming catalog.
//!
//! This crate provides:
//! - `Cleaner`: drops incomplete catalog rows and reduces country and
//!   category lists to a single region and genre
//! - `Enricher`: attaches external ratings, one throttled lookup per
//!   distinct (title, year)
//! - `Throttle`: fixed-delay gate between external requests
//!
//! ## Architecture
//! The pipelines run one after the other, each reading and writing a table:
//! 1. raw catalog → `Cleaner` → cleaned table
//! 2. cleaned table → `Enricher` → enriched table
//!
//! ## Example Usage
//! ```ignore
//! use metadata_client::{OmdbClient, OmdbConfig};
//! use pipeline::{Cleaner, Enricher};
//! use std::path::Path;
//!
//! Cleaner::clean_file(Path::new("netflix_titles.csv"), Path::new("netflix_cleaned.csv"))?;
//!
//! let client = OmdbClient::new(OmdbConfig::new(api_key))?;
//! let mut enricher = Enricher::new(client);
//! enricher.enrich_file(Path::new("netflix_cleaned.csv"), Path::new("netflix_imdb_enriched.csv"))?;
//! ```

pub mod clean;
pub mod enrich;
pub mod throttle;

// Re-export main types
pub use clean::{CleanReport, Cleaner, first_token};
pub use enrich::{DEFAULT_LOOKUP_DELAY, EnrichReport, Enricher, LookupOutcome, distinct_keys, merge};
pub use throttle::Throttle;

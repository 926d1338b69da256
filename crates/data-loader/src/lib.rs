//! # Data Loader Crate
//!
//! This crate reads and writes the tables shared by the cleaner, the
//! enricher and the dashboard.
//!
//! ## Main Components
//!
//! - **types**: Record types (CatalogRecord, CleanedRecord, EnrichedRecord, CountryRow)
//! - **parser**: CSV table reading and writing with header checks
//! - **literal**: Schema-checked parsing of `[{"name": ...}]` list cells
//! - **index**: The `MovieCatalog` load cache used by the dashboard
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load(
//!     Path::new("tmdb_5000_movies.csv"),
//!     Path::new("tmdb_5000_credits.csv"),
//! )?;
//!
//! for row in catalog.rows_for("France") {
//!     println!("{} ({:.2})", row.title, row.popularity);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod literal;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::MovieCatalog;
pub use parser::{Table, non_blank, read_table, write_table};
pub use types::{
    // Type aliases
    MovieId,
    // Records
    CatalogRecord,
    CleanedRecord,
    CountryRow,
    CreditsRow,
    EnrichedRecord,
    EnrichmentKey,
    ExternalMetadata,
    MovieRow,
    TableRow,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = MovieCatalog::default();

        assert!(catalog.is_empty());
        assert!(catalog.countries().is_empty());
        assert_eq!(catalog.rows_for("France").count(), 0);
    }

    #[test]
    fn test_enriched_record_from_cleaned() {
        let cleaned = CleanedRecord {
            title: "Dark".to_string(),
            kind: "TV Show".to_string(),
            genre: "Crime TV Shows".to_string(),
            year: 2017,
            rating: Some("TV-MA".to_string()),
            region: "Germany".to_string(),
        };
        let metadata = ExternalMetadata {
            rating: Some(8.7),
            votes: Some(412_000),
            genres: Some("Crime, Drama, Mystery".to_string()),
        };

        let enriched = EnrichedRecord::new(cleaned.clone(), &metadata);

        assert_eq!(enriched.title, "Dark");
        assert_eq!(enriched.region, "Germany");
        assert_eq!(enriched.imdb_rating, Some(8.7));
        assert_eq!(enriched.imdb_votes, Some(412_000));
        assert_eq!(cleaned.key(), EnrichmentKey { title: "Dark".to_string(), year: 2017 });
    }

    #[test]
    fn test_missing_metadata() {
        assert!(ExternalMetadata::missing().is_missing());
        assert!(!ExternalMetadata { votes: Some(1), ..Default::default() }.is_missing());
    }
}

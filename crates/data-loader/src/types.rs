//! Core record types for the catalog, enrichment and dashboard tables.
//!
//! Field names follow the CSV headers byte for byte (serde renames where the
//! header is a Rust keyword), because joins and projections are keyed on
//! those names.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier shared by the movies and credits tables
pub type MovieId = u32;

/// Column layout of a table this crate writes.
///
/// The header is written from this list even when there are no rows, so an
/// empty output is still a valid table.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

// =============================================================================
// Catalog (cleaner input)
// =============================================================================

/// One row of the raw streaming catalog.
///
/// Every field is optional: presence is decided by the cleaner, not by the
/// parser, so a row with holes still loads and is then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Comma-joined list, e.g. "United States, Canada"
    pub country: Option<String>,
    /// Unparseable years load as `None`
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    /// Comma-joined list of categories, e.g. "Dramas, Comedies"
    pub listed_in: Option<String>,
}

impl CatalogRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] =
        &["title", "type", "country", "release_year", "rating", "listed_in"];
}

// =============================================================================
// Cleaned and enriched records
// =============================================================================

/// A catalog row after cleaning: single region, single genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<String>,
    pub region: String,
}

impl CleanedRecord {
    /// The join key used by the enricher
    pub fn key(&self) -> EnrichmentKey {
        EnrichmentKey {
            title: self.title.clone(),
            year: self.year,
        }
    }
}

impl TableRow for CleanedRecord {
    const COLUMNS: &'static [&'static str] = &["title", "type", "genre", "year", "rating", "region"];
}

/// (title, year) pair looked up at most once per enrichment run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnrichmentKey {
    pub title: String,
    pub year: i32,
}

/// Ratings data attached from the external lookup.
///
/// All three fields are `None` when no candidate matched or the lookup
/// failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalMetadata {
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    /// Genre names joined with ", "
    pub genres: Option<String>,
}

impl ExternalMetadata {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.rating.is_none() && self.votes.is_none() && self.genres.is_none()
    }
}

/// A cleaned row plus the external ratings columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<String>,
    pub region: String,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<u64>,
    pub genres_imdb: Option<String>,
}

impl EnrichedRecord {
    pub fn new(record: CleanedRecord, metadata: &ExternalMetadata) -> Self {
        Self {
            title: record.title,
            kind: record.kind,
            genre: record.genre,
            year: record.year,
            rating: record.rating,
            region: record.region,
            imdb_rating: metadata.rating,
            imdb_votes: metadata.votes,
            genres_imdb: metadata.genres.clone(),
        }
    }
}

impl TableRow for EnrichedRecord {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "type",
        "genre",
        "year",
        "rating",
        "region",
        "imdb_rating",
        "imdb_votes",
        "genres_imdb",
    ];
}

// =============================================================================
// Dashboard tables
// =============================================================================

/// Raw row of the movies metadata table.
///
/// Numeric columns are coerced: anything that does not parse becomes `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub id: Option<MovieId>,
    pub original_title: Option<String>,
    /// Serialized list literal: `[{"iso_3166_1": "US", "name": "United States of America"}]`
    pub production_countries: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub popularity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub vote_average: Option<f64>,
    /// Serialized list literal: `[{"id": 18, "name": "Drama"}]`
    pub genres: Option<String>,
    pub overview: Option<String>,
    pub homepage: Option<String>,
    pub release_date: Option<String>,
}

impl MovieRow {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "id",
        "original_title",
        "production_countries",
        "popularity",
        "vote_average",
        "genres",
        "overview",
        "homepage",
        "release_date",
    ];
}

/// Raw row of the credits table; only the join key is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditsRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub movie_id: Option<MovieId>,
}

impl CreditsRow {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["movie_id"];
}

/// One movie exploded to a single production country.
///
/// A movie made in N countries appears as N rows sharing `id`, so ranking by
/// country is a plain filter and sort.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub id: MovieId,
    pub title: String,
    pub country: String,
    pub popularity: f64,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    pub overview: Option<String>,
    pub homepage: Option<String>,
    pub release_date: String,
}

//! Per-country ranking and genre aggregation.
//!
//! ## Algorithm
//! 1. Filter catalog rows to the country (exact name match)
//! 2. Stable sort by popularity, descending; equal popularity keeps catalog order
//! 3. Keep the first ten
//!
//! Genre counts are taken over the kept rows only.

use data_loader::{CountryRow, MovieCatalog};
use std::collections::HashMap;
use tracing::debug;

/// Rows shown per country
pub const TOP_N: usize = 10;

/// Number of top-N movies carrying one genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSlice {
    pub genre: String,
    pub count: usize,
}

/// The ten most popular rows for `country`; fewer when it has fewer.
pub fn top10<'a>(catalog: &'a MovieCatalog, country: &str) -> Vec<&'a CountryRow> {
    top_n(catalog, country, TOP_N)
}

pub fn top_n<'a>(catalog: &'a MovieCatalog, country: &str, n: usize) -> Vec<&'a CountryRow> {
    let mut rows: Vec<&CountryRow> = catalog.rows_for(country).collect();
    // sort_by is stable
    rows.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    rows.truncate(n);
    debug!("Top {} for {}: {} rows", n, country, rows.len());
    rows
}

/// Genre occurrence counts, most frequent first; ties keep first-seen order.
pub fn genre_counts(rows: &[&CountryRow]) -> Vec<GenreSlice> {
    let mut slices: Vec<GenreSlice> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for genre in rows.iter().flat_map(|row| row.genres.iter()) {
        match positions.get(genre.as_str()) {
            Some(&i) => slices[i].count += 1,
            None => {
                positions.insert(genre.as_str(), slices.len());
                slices.push(GenreSlice {
                    genre: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

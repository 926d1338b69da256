//! MovieCatalog building and indexing logic.
//!
//! The catalog is the dashboard's load cache: movies joined with credits,
//! exploded to one row per production country, numeric columns coerced and
//! incomplete rows dropped. It is built once at process start and shared by
//! reference; nothing invalidates it short of restarting the process.

use crate::error::Result;
use crate::literal::{parse_named_list, parse_strict_named_list};
use crate::parser::{self, non_blank};
use crate::types::*;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Exploded, filtered movie rows plus a per-country index
#[derive(Debug, Default)]
pub struct MovieCatalog {
    rows: Vec<CountryRow>,
    /// Sorted, distinct country names
    countries: Vec<String>,
    /// Row positions per country, in row order
    by_country: HashMap<String, Vec<usize>>,
}

impl MovieCatalog {
    /// Load and join the movies and credits tables.
    ///
    /// Steps:
    /// 1. Parse both files
    /// 2. Inner-join on movie id
    /// 3. Explode production countries
    /// 4. Drop rows missing a country, popularity, title or release date
    pub fn load(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        info!("Loading movies from {:?} and credits from {:?}", movies_path, credits_path);

        let movies = parser::read_table::<MovieRow>(movies_path, MovieRow::REQUIRED_COLUMNS)?;
        let credits = parser::read_table::<CreditsRow>(credits_path, CreditsRow::REQUIRED_COLUMNS)?;

        let (movie_count, credit_count) = (movies.rows.len(), credits.rows.len());
        let catalog = Self::from_tables(movies.rows, credits.rows);
        info!(
            "Catalog ready: {} movies, {} credits, {} country rows across {} countries",
            movie_count,
            credit_count,
            catalog.len(),
            catalog.countries.len()
        );
        Ok(catalog)
    }

    /// Same as [`MovieCatalog::load`] but from in-memory readers
    pub fn from_readers<M: Read, C: Read>(movies: M, credits: C) -> Result<Self> {
        let movies = parser::read_table_from_reader::<MovieRow, _>(
            movies,
            "movies",
            MovieRow::REQUIRED_COLUMNS,
        )?;
        let credits = parser::read_table_from_reader::<CreditsRow, _>(
            credits,
            "credits",
            CreditsRow::REQUIRED_COLUMNS,
        )?;
        Ok(Self::from_tables(movies.rows, credits.rows))
    }

    /// Build the catalog from parsed rows.
    ///
    /// A movie is kept once per credits row carrying its id, in movies
    /// table order. Rows without an id never join.
    pub fn from_tables(movies: Vec<MovieRow>, credits: Vec<CreditsRow>) -> Self {
        let mut credit_counts: HashMap<MovieId, usize> = HashMap::new();
        for credit in &credits {
            if let Some(id) = credit.movie_id {
                *credit_counts.entry(id).or_insert(0) += 1;
            }
        }

        let mut catalog = MovieCatalog::default();
        let mut dropped = 0usize;

        for movie in movies {
            let Some(id) = movie.id else { continue };
            let matches = credit_counts.get(&id).copied().unwrap_or(0);
            if matches == 0 {
                continue;
            }

            let exploded = explode(id, &movie);
            if exploded.is_empty() {
                dropped += matches;
                continue;
            }
            for _ in 0..matches {
                for row in &exploded {
                    catalog.push(row.clone());
                }
            }
        }

        catalog.countries = catalog
            .by_country
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        debug!("Dropped {} joined movies with incomplete fields", dropped);
        catalog
    }

    fn push(&mut self, row: CountryRow) {
        self.by_country
            .entry(row.country.clone())
            .or_default()
            .push(self.rows.len());
        self.rows.push(row);
    }

    /// All country rows in table order
    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    /// Sorted, distinct country names
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.by_country.contains_key(country)
    }

    /// Rows for one country (exact match), in table order
    pub fn rows_for<'a>(&'a self, country: &str) -> impl Iterator<Item = &'a CountryRow> + use<'a> {
        self.by_country
            .get(country)
            .map(|idx| idx.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.rows[i])
    }

    /// Number of country rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One `CountryRow` per production country, or none when the movie lacks a
/// mandatory field.
fn explode(id: MovieId, movie: &MovieRow) -> Vec<CountryRow> {
    let (Some(title), Some(popularity), Some(release_date)) = (
        non_blank(&movie.original_title),
        movie.popularity.filter(|p| p.is_finite()),
        non_blank(&movie.release_date),
    ) else {
        return Vec::new();
    };

    let countries = movie
        .production_countries
        .as_deref()
        .map(parse_named_list)
        .unwrap_or_default();
    let genres = movie
        .genres
        .as_deref()
        .map(parse_strict_named_list)
        .unwrap_or_default();

    countries
        .into_iter()
        .map(|country| CountryRow {
            id,
            title: title.to_string(),
            country,
            popularity,
            vote_average: movie.vote_average.filter(|v| v.is_finite()),
            genres: genres.clone(),
            overview: non_blank(&movie.overview).map(str::to_string),
            homepage: non_blank(&movie.homepage).map(str::to_string),
            release_date: release_date.to_string(),
        })
        .collect()
}

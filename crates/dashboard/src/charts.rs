//! Chart data for a country's top 10.
//!
//! Charts are plain data; drawing them is up to the front end.

use crate::ranking::genre_counts;
use data_loader::CountryRow;

/// How far every genre slice is pulled out, as a fraction of the radius
pub const SLICE_PULL: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Popularity per movie, in ranking order
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl PopularityChart {
    pub fn build(country: &str, rows: &[&CountryRow]) -> Self {
        Self {
            title: format!("Top 10 Popular Movies in {country}"),
            bars: rows
                .iter()
                .map(|row| Bar {
                    label: row.title.clone(),
                    value: row.popularity,
                })
                .collect(),
        }
    }

    /// Largest bar value, 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    /// Fraction of all genre occurrences, in `[0, 1]`
    pub share: f64,
    pub pull: f64,
}

/// Genre distribution over a country's top 10
#[derive(Debug, Clone, PartialEq)]
pub struct GenreChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl GenreChart {
    pub fn build(country: &str, rows: &[&CountryRow]) -> Self {
        let counts = genre_counts(rows);
        let total: usize = counts.iter().map(|s| s.count).sum();

        let slices = counts
            .into_iter()
            .map(|s| Slice {
                share: s.count as f64 / total as f64,
                label: s.genre,
                count: s.count,
                pull: SLICE_PULL,
            })
            .collect();

        Self {
            title: format!("Genre Distribution in {country}"),
            slices,
        }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

//! The dashboard as data.
//!
//! [`build_view`] recomputes everything from the catalog and a resolved
//! selection; nothing derived is kept between calls.

use crate::charts::{GenreChart, PopularityChart};
use crate::error::{DashboardError, Result};
use crate::export::{export_csv, export_file_name, export_to_dir};
use crate::ranking::top10;
use crate::selection::ResolvedSelection;
use data_loader::{CountryRow, MovieCatalog};
use std::path::{Path, PathBuf};

pub const NO_OVERVIEW: &str = "No overview available.";
pub const NO_MOVIES: &str = "No movies found.";

/// One entry of the single-country movie list
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub title: String,
    pub popularity: f64,
    pub vote_average: Option<f64>,
    pub overview: String,
    pub homepage: Option<String>,
}

impl MovieDetail {
    fn from_row(row: &CountryRow) -> Self {
        Self {
            title: row.title.clone(),
            popularity: row.popularity,
            vote_average: row.vote_average,
            overview: row
                .overview
                .clone()
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
            homepage: row.homepage.clone(),
        }
    }

    /// Popularity with two decimals
    pub fn popularity_label(&self) -> String {
        format!("{:.2}", self.popularity)
    }

    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(v) => v.to_string(),
            None => "n/a".to_string(),
        }
    }
}

/// Both charts for one country
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPanel {
    pub country: String,
    pub popularity: PopularityChart,
    pub genres: GenreChart,
}

impl CountryPanel {
    fn build(country: &str, rows: &[&CountryRow]) -> Self {
        Self {
            country: country.to_string(),
            popularity: PopularityChart::build(country, rows),
            genres: GenreChart::build(country, rows),
        }
    }
}

#[derive(Debug)]
pub struct SingleCountryView<'a> {
    pub country: String,
    pub top10: Vec<&'a CountryRow>,
    pub details: Vec<MovieDetail>,
    pub panel: CountryPanel,
}

impl SingleCountryView<'_> {
    pub fn is_empty(&self) -> bool {
        self.top10.is_empty()
    }

    /// Warning shown instead of the list, charts and export
    pub fn warning(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_MOVIES)
    }

    /// Export file name, `None` when there is nothing to export
    pub fn export_name(&self) -> Option<String> {
        (!self.is_empty()).then(|| export_file_name(&self.country))
    }

    pub fn export_csv(&self) -> Result<String> {
        if self.is_empty() {
            return Err(DashboardError::ExportUnavailable);
        }
        export_csv(&self.top10)
    }

    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        if self.is_empty() {
            return Err(DashboardError::ExportUnavailable);
        }
        export_to_dir(dir, &self.country, &self.top10)
    }
}

/// Two countries side by side, charts only
#[derive(Debug)]
pub struct CompareView {
    pub primary: CountryPanel,
    pub secondary: CountryPanel,
}

#[derive(Debug)]
pub enum DashboardView<'a> {
    Single(SingleCountryView<'a>),
    Compare(CompareView),
}

pub fn build_view<'a>(catalog: &'a MovieCatalog, selection: &ResolvedSelection) -> DashboardView<'a> {
    match &selection.secondary {
        None => {
            let rows = top10(catalog, &selection.primary);
            DashboardView::Single(SingleCountryView {
                country: selection.primary.clone(),
                details: rows.iter().map(|row| MovieDetail::from_row(row)).collect(),
                panel: CountryPanel::build(&selection.primary, &rows),
                top10: rows,
            })
        }
        Some(secondary) => {
            let primary_rows = top10(catalog, &selection.primary);
            let secondary_rows = top10(catalog, secondary);
            DashboardView::Compare(CompareView {
                primary: CountryPanel::build(&selection.primary, &primary_rows),
                secondary: CountryPanel::build(secondary, &secondary_rows),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CreditsRow, MovieRow};

    fn catalog() -> MovieCatalog {
        let movies = vec![
            MovieRow {
                id: Some(1),
                original_title: Some("Amélie".to_string()),
                production_countries: Some(r#"[{"name": "France"}, {"name": "Germany"}]"#.to_string()),
                popularity: Some(73.456),
                vote_average: Some(7.8),
                genres: Some(r#"[{"name": "Comedy"}, {"name": "Romance"}]"#.to_string()),
                overview: Some("A shy waitress decides to change lives.".to_string()),
                homepage: Some("http://www.miramax.com/amelie".to_string()),
                release_date: Some("2001-04-25".to_string()),
            },
            MovieRow {
                id: Some(2),
                original_title: Some("La Haine".to_string()),
                production_countries: Some(r#"[{"name": "France"}]"#.to_string()),
                popularity: Some(20.0),
                vote_average: None,
                genres: Some(r#"[{"name": "Drama"}]"#.to_string()),
                overview: None,
                homepage: None,
                release_date: Some("1995-05-31".to_string()),
            },
        ];
        let credits = vec![CreditsRow { movie_id: Some(1) }, CreditsRow { movie_id: Some(2) }];
        MovieCatalog::from_tables(movies, credits)
    }

    fn single(selection: ResolvedSelection, catalog: &MovieCatalog) -> SingleCountryView<'_> {
        match build_view(catalog, &selection) {
            DashboardView::Single(view) => view,
            DashboardView::Compare(_) => panic!("expected single-country view"),
        }
    }

    #[test]
    fn test_single_country_view() {
        let catalog = catalog();
        let view = single(
            ResolvedSelection { primary: "France".to_string(), secondary: None },
            &catalog,
        );

        assert_eq!(view.warning(), None);
        assert_eq!(view.details.len(), 2);
        assert_eq!(view.details[0].title, "Amélie");
        assert_eq!(view.details[0].popularity_label(), "73.46");
        assert_eq!(view.details[0].rating_label(), "7.8");
        assert_eq!(view.details[1].overview, NO_OVERVIEW);
        assert_eq!(view.details[1].homepage, None);
        assert_eq!(view.details[1].rating_label(), "n/a");
        assert_eq!(view.panel.popularity.bars.len(), 2);
        assert_eq!(view.export_name().as_deref(), Some("top10_France.csv"));
        assert!(view.export_csv().unwrap().contains("La Haine"));
    }

    #[test]
    fn test_empty_country_has_warning_and_no_export() {
        let catalog = catalog();
        let view = single(
            ResolvedSelection { primary: "Japan".to_string(), secondary: None },
            &catalog,
        );

        assert_eq!(view.warning(), Some(NO_MOVIES));
        assert_eq!(view.export_name(), None);
        assert!(matches!(view.export_csv(), Err(DashboardError::ExportUnavailable)));
    }

    #[test]
    fn test_compare_view() {
        let catalog = catalog();
        let selection = ResolvedSelection {
            primary: "France".to_string(),
            secondary: Some("Germany".to_string()),
        };

        let DashboardView::Compare(view) = build_view(&catalog, &selection) else {
            panic!("expected compare view");
        };

        assert_eq!(view.primary.country, "France");
        assert_eq!(view.primary.popularity.bars.len(), 2);
        assert_eq!(view.secondary.country, "Germany");
        assert_eq!(view.secondary.popularity.bars.len(), 1);
        assert_eq!(view.secondary.genres.title, "Genre Distribution in Germany");
    }

    #[test]
    fn test_view_is_recomputed_per_call() {
        let catalog = catalog();
        let selection = ResolvedSelection { primary: "France".to_string(), secondary: None };

        let first = single(selection.clone(), &catalog);
        let second = single(selection, &catalog);

        assert_eq!(first.details, second.details);
        assert_eq!(first.panel, second.panel);
    }
}

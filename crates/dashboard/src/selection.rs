//! Country selection.
//!
//! A [`Selection`] is what the user asked for; resolving it against the
//! catalog fills in defaults and rejects names the catalog does not know.

use crate::error::{DashboardError, Result};
use data_loader::MovieCatalog;

/// Requested countries and compare toggle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Defaults to the first country in sorted order
    pub primary: Option<String>,
    pub compare: bool,
    /// Only used when `compare` is on. Defaults to the first country other
    /// than the primary one.
    pub secondary: Option<String>,
}

/// A selection checked against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub primary: String,
    /// `Some` exactly when compare mode is on
    pub secondary: Option<String>,
}

impl Selection {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: Some(primary.into()),
            ..Default::default()
        }
    }

    /// Turn compare mode on, against `secondary` or the default
    pub fn with_compare(mut self, secondary: Option<String>) -> Self {
        self.compare = true;
        self.secondary = secondary;
        self
    }

    pub fn resolve(&self, catalog: &MovieCatalog) -> Result<ResolvedSelection> {
        let countries = catalog.countries();
        let primary = match &self.primary {
            Some(country) if catalog.has_country(country) => country.clone(),
            Some(country) => return Err(DashboardError::UnknownCountry(country.clone())),
            None => countries.first().cloned().ok_or(DashboardError::EmptyCatalog)?,
        };

        if !self.compare {
            return Ok(ResolvedSelection { primary, secondary: None });
        }

        let secondary = match &self.secondary {
            Some(country) if *country == primary => {
                return Err(DashboardError::SameCountry(country.clone()));
            }
            Some(country) if catalog.has_country(country) => country.clone(),
            Some(country) => return Err(DashboardError::UnknownCountry(country.clone())),
            None => secondary_options(catalog, &primary)
                .next()
                .map(str::to_string)
                .ok_or(DashboardError::NothingToCompare)?,
        };

        Ok(ResolvedSelection {
            primary,
            secondary: Some(secondary),
        })
    }
}

/// Countries offered for comparison: every country except `primary`, sorted
pub fn secondary_options<'a>(
    catalog: &'a MovieCatalog,
    primary: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    catalog
        .countries()
        .iter()
        .map(String::as_str)
        .filter(move |c| *c != primary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CreditsRow, MovieRow};

    fn catalog(countries: &[&str]) -> MovieCatalog {
        let literal: Vec<String> = countries
            .iter()
            .map(|c| format!(r#"{{"name": "{c}"}}"#))
            .collect();
        let movie = MovieRow {
            id: Some(1),
            original_title: Some("Shared".to_string()),
            production_countries: Some(format!("[{}]", literal.join(", "))),
            popularity: Some(1.0),
            release_date: Some("2000-01-01".to_string()),
            ..Default::default()
        };
        MovieCatalog::from_tables(vec![movie], vec![CreditsRow { movie_id: Some(1) }])
    }

    #[test]
    fn test_defaults_to_first_country() {
        let catalog = catalog(&["Spain", "Brazil", "Japan"]);
        let resolved = Selection::default().resolve(&catalog).unwrap();

        assert_eq!(resolved.primary, "Brazil");
        assert_eq!(resolved.secondary, None);
    }

    #[test]
    fn test_compare_defaults_to_first_other_country() {
        let catalog = catalog(&["Spain", "Brazil", "Japan"]);
        let resolved = Selection::new("Brazil").with_compare(None).resolve(&catalog).unwrap();

        assert_eq!(resolved.secondary.as_deref(), Some("Japan"));
    }

    #[test]
    fn test_secondary_options_exclude_primary() {
        let catalog = catalog(&["Spain", "Brazil", "Japan"]);
        let options: Vec<&str> = secondary_options(&catalog, "Japan").collect();

        assert_eq!(options, vec!["Brazil", "Spain"]);
    }

    #[test]
    fn test_rejects_unknown_and_same_country() {
        let catalog = catalog(&["Spain", "Brazil"]);

        assert!(matches!(
            Selection::new("Atlantis").resolve(&catalog),
            Err(DashboardError::UnknownCountry(ref c)) if c == "Atlantis"
        ));
        assert!(matches!(
            Selection::new("Spain").with_compare(Some("Spain".to_string())).resolve(&catalog),
            Err(DashboardError::SameCountry(_))
        ));
        assert!(matches!(
            Selection::new("Spain").with_compare(Some("Peru".to_string())).resolve(&catalog),
            Err(DashboardError::UnknownCountry(_))
        ));
    }

    #[test]
    fn test_compare_needs_two_countries() {
        let catalog = catalog(&["Spain"]);
        let result = Selection::new("Spain").with_compare(None).resolve(&catalog);

        assert!(matches!(result, Err(DashboardError::NothingToCompare)));
    }

    #[test]
    fn test_empty_catalog() {
        let result = Selection::default().resolve(&MovieCatalog::default());
        assert!(matches!(result, Err(DashboardError::EmptyCatalog)));
    }
}

//! Interactive dashboard session.
//!
//! A session holds only the user's [`Selection`]; every command that changes
//! it is checked against the catalog first and leaves the previous
//! selection in place when rejected.
//!
//! Commands:
//! - `country <name>`: choose the primary country
//! - `compare <name>`: compare against a second country
//! - `compare`: compare against the default second country
//! - `compare off`: back to the single-country view
//! - `countries`: list available countries
//! - `export [dir]`: write the current top 10 to `top10_<country>.csv`
//! - `help`, `quit`

use crate::error::{DashboardError, Result};
use crate::selection::{ResolvedSelection, Selection};
use crate::view::{DashboardView, build_view};
use data_loader::MovieCatalog;
use std::path::PathBuf;
use tracing::debug;

pub const HELP: &str = "\
Commands:
  country <name>   show the top 10 for a country
  compare <name>   compare with a second country
  compare          compare with the first other country
  compare off      back to a single country
  countries        list available countries
  export [dir]     save the current top 10 as CSV (default: current dir)
  help             show this message
  quit             leave the dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Country(String),
    Compare(Option<String>),
    CompareOff,
    Countries,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Country names may contain spaces.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match word.to_ascii_lowercase().as_str() {
            "country" | "c" => arg
                .map(Command::Country)
                .ok_or(DashboardError::MissingCountry("country")),
            "compare" | "vs" => match arg.as_deref() {
                Some("off") => Ok(Command::CompareOff),
                _ => Ok(Command::Compare(arg)),
            },
            "countries" | "ls" => Ok(Command::Countries),
            "export" => Ok(Command::Export(arg.map(PathBuf::from))),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(DashboardError::UnknownCommand(line.to_string())),
        }
    }
}

/// What the front end should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The selection changed; draw [`Session::view`]
    Render,
    Countries(Vec<String>),
    Exported(PathBuf),
    Help,
    Quit,
}

pub struct Session<'a> {
    catalog: &'a MovieCatalog,
    selection: Selection,
    resolved: ResolvedSelection,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a MovieCatalog, selection: Selection) -> Result<Self> {
        let resolved = selection.resolve(catalog)?;
        Ok(Self {
            catalog,
            selection,
            resolved,
        })
    }

    pub fn selection(&self) -> &ResolvedSelection {
        &self.resolved
    }

    /// The view for the current selection, rebuilt from the catalog
    pub fn view(&self) -> DashboardView<'a> {
        build_view(self.catalog, &self.resolved)
    }

    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let command = Command::parse(line)?;
        debug!("Dashboard command: {:?}", command);
        self.apply(command)
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Country(country) => {
                let mut next = self.selection.clone();
                next.primary = Some(country);
                // A compare partner equal to the new primary falls back to the default
                if next.secondary == next.primary {
                    next.secondary = None;
                }
                self.select(next)
            }
            Command::Compare(secondary) => {
                let next = Selection {
                    primary: Some(self.resolved.primary.clone()),
                    compare: true,
                    secondary,
                };
                self.select(next)
            }
            Command::CompareOff => {
                let next = Selection {
                    compare: false,
                    ..self.selection.clone()
                };
                self.select(next)
            }
            Command::Countries => Ok(Outcome::Countries(self.catalog.countries().to_vec())),
            Command::Export(dir) => {
                let DashboardView::Single(view) = self.view() else {
                    return Err(DashboardError::ExportUnavailable);
                };
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                view.export_to_dir(&dir).map(Outcome::Exported)
            }
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    fn select(&mut self, next: Selection) -> Result<Outcome> {
        self.resolved = next.resolve(self.catalog)?;
        self.selection = next;
        Ok(Outcome::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CreditsRow, MovieRow};

    fn catalog() -> MovieCatalog {
        let movie = |id: u32, title: &str, countries: &str, popularity: f64| MovieRow {
            id: Some(id),
            original_title: Some(title.to_string()),
            production_countries: Some(countries.to_string()),
            popularity: Some(popularity),
            genres: Some(r#"[{"name": "Drama"}]"#.to_string()),
            release_date: Some("2004-09-01".to_string()),
            ..Default::default()
        };
        let movies = vec![
            movie(1, "Oldboy", r#"[{"name": "South Korea"}]"#, 31.0),
            movie(2, "City of God", r#"[{"name": "Brazil"}, {"name": "France"}]"#, 25.0),
            movie(3, "Amores perros", r#"[{"name": "Mexico"}]"#, 12.0),
        ];
        let credits = (1..=3).map(|id| CreditsRow { movie_id: Some(id) }).collect();
        MovieCatalog::from_tables(movies, credits)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("country South Korea").unwrap(), Command::Country("South Korea".to_string()));
        assert_eq!(Command::parse("  compare   France ").unwrap(), Command::Compare(Some("France".to_string())));
        assert_eq!(Command::parse("compare").unwrap(), Command::Compare(None));
        assert_eq!(Command::parse("compare off").unwrap(), Command::CompareOff);
        assert_eq!(Command::parse("export out").unwrap(), Command::Export(Some(PathBuf::from("out"))));
        assert_eq!(Command::parse("QUIT").unwrap(), Command::Quit);
        assert!(matches!(Command::parse("country"), Err(DashboardError::MissingCountry(_))));
        assert!(matches!(Command::parse("dance"), Err(DashboardError::UnknownCommand(_))));
    }

    #[test]
    fn test_selection_changes() {
        let catalog = catalog();
        let mut session = Session::new(&catalog, Selection::default()).unwrap();
        assert_eq!(session.selection().primary, "Brazil");

        assert_eq!(session.execute("country Mexico").unwrap(), Outcome::Render);
        assert_eq!(session.selection().primary, "Mexico");

        session.execute("compare France").unwrap();
        assert_eq!(session.selection().secondary.as_deref(), Some("France"));
        assert!(matches!(session.view(), DashboardView::Compare(_)));

        session.execute("compare off").unwrap();
        assert_eq!(session.selection().secondary, None);
        assert!(matches!(session.view(), DashboardView::Single(_)));
    }

    #[test]
    fn test_switching_primary_onto_compare_partner() {
        let catalog = catalog();
        let mut session = Session::new(&catalog, Selection::new("Mexico").with_compare(Some("France".to_string()))).unwrap();

        session.execute("country France").unwrap();

        assert_eq!(session.selection().primary, "France");
        assert_eq!(session.selection().secondary.as_deref(), Some("Brazil"));
    }

    #[test]
    fn test_rejected_command_keeps_selection() {
        let catalog = catalog();
        let mut session = Session::new(&catalog, Selection::new("Mexico")).unwrap();

        assert!(session.execute("country Atlantis").is_err());
        assert!(session.execute("compare Mexico").is_err());

        assert_eq!(session.selection().primary, "Mexico");
        assert_eq!(session.selection().secondary, None);
    }

    #[test]
    fn test_export_only_in_single_mode() {
        let catalog = catalog();
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&catalog, Selection::new("Brazil")).unwrap();

        let command = format!("export {}", dir.path().display());
        let Outcome::Exported(path) = session.execute(&command).unwrap() else {
            panic!("expected export");
        };
        assert!(path.ends_with("top10_Brazil.csv"));
        assert!(path.exists());

        session.execute("compare").unwrap();
        assert!(matches!(session.execute(&command), Err(DashboardError::ExportUnavailable)));
    }

    #[test]
    fn test_countries_and_quit() {
        let catalog = catalog();
        let mut session = Session::new(&catalog, Selection::default()).unwrap();

        assert_eq!(
            session.execute("countries").unwrap(),
            Outcome::Countries(vec![
                "Brazil".to_string(),
                "France".to_string(),
                "Mexico".to_string(),
                "South Korea".to_string(),
            ])
        );
        assert_eq!(session.execute("quit").unwrap(), Outcome::Quit);
    }
}

//! CSV export of a country's top 10.
//!
//! Each exported row is a projection of the joined movie row onto the nine
//! columns the dashboard shows. Other movies table columns (budget, cast,
//! crew and so on) are not written.

use crate::error::Result;
use data_loader::parser::write_table_to_writer;
use data_loader::{CountryRow, TableRow, write_table};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exported row: one top-10 entry, genres joined with ", "
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: u32,
    original_title: &'a str,
    country: &'a str,
    popularity: f64,
    vote_average: Option<f64>,
    genres: String,
    overview: Option<&'a str>,
    homepage: Option<&'a str>,
    release_date: &'a str,
}

impl TableRow for ExportRow<'_> {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "original_title",
        "country",
        "popularity",
        "vote_average",
        "genres",
        "overview",
        "homepage",
        "release_date",
    ];
}

impl<'a> From<&'a CountryRow> for ExportRow<'a> {
    fn from(row: &'a CountryRow) -> Self {
        Self {
            id: row.id,
            original_title: &row.title,
            country: &row.country,
            popularity: row.popularity,
            vote_average: row.vote_average,
            genres: row.genres.join(", "),
            overview: row.overview.as_deref(),
            homepage: row.homepage.as_deref(),
            release_date: &row.release_date,
        }
    }
}

/// Download name for a country's export
pub fn export_file_name(country: &str) -> String {
    format!("top10_{country}.csv")
}

/// Render rows as CSV text, header included
pub fn export_csv(rows: &[&CountryRow]) -> Result<String> {
    let export: Vec<ExportRow> = rows.iter().map(|row| ExportRow::from(*row)).collect();
    let mut out = Vec::new();
    write_table_to_writer(&mut out, "export", &export)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write `top10_<country>.csv` into `dir`, returning its path.
pub fn export_to_dir(dir: &Path, country: &str, rows: &[&CountryRow]) -> Result<PathBuf> {
    let path = dir.join(export_file_name(country));
    let export: Vec<ExportRow> = rows.iter().map(|row| ExportRow::from(*row)).collect();
    write_table(&path, &export)?;
    info!("Exported {} rows for {} to {:?}", export.len(), country, path);
    Ok(path)
}

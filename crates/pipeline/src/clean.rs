//! Catalog cleaning.
//!
//! Drops rows missing any of title, country, release year, type or
//! categories, reduces the multi-valued country and category cells to their
//! first entry, and projects to the cleaned column layout. Row order is
//! preserved.

use anyhow::{Context, Result};
use data_loader::{CatalogRecord, CleanedRecord, non_blank, read_table, write_table};
use std::path::Path;
use tracing::info;

/// Number of rows logged as a preview after cleaning
const PREVIEW_ROWS: usize = 5;

/// Row and column counts observed during a cleaning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub output_rows: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.input_rows - self.output_rows
    }
}

/// Cleans raw catalog rows into [`CleanedRecord`]s.
pub struct Cleaner;

impl Cleaner {
    /// Clean one row, or `None` when a mandatory cell is missing.
    pub fn clean_record(record: &CatalogRecord) -> Option<CleanedRecord> {
        let title = non_blank(&record.title)?;
        let country = non_blank(&record.country)?;
        let year = record.release_year?;
        let kind = non_blank(&record.kind)?;
        let listed_in = non_blank(&record.listed_in)?;

        Some(CleanedRecord {
            title: title.to_string(),
            kind: kind.to_string(),
            genre: first_token(listed_in),
            year,
            rating: record.rating.clone(),
            region: first_token(country),
        })
    }

    /// Clean every row, keeping the input order
    pub fn clean_records(records: Vec<CatalogRecord>) -> Vec<CleanedRecord> {
        records.iter().filter_map(Self::clean_record).collect()
    }

    /// Read the catalog at `input`, clean it and write the result to `output`.
    ///
    /// `output` is overwritten.
    pub fn clean_file(input: &Path, output: &Path) -> Result<CleanReport> {
        info!("Loading catalog from {:?}", input);
        let table = read_table::<CatalogRecord>(input, CatalogRecord::REQUIRED_COLUMNS)
            .with_context(|| format!("Failed to read catalog {}", input.display()))?;

        let (input_rows, input_columns) = table.shape();
        info!("Initial data shape: ({}, {})", input_rows, input_columns);

        let cleaned = Self::clean_records(table.rows);
        let report = CleanReport {
            input_rows,
            input_columns,
            output_rows: cleaned.len(),
        };
        info!(
            "Cleaned data shape: ({}, 6), dropped {} incomplete rows",
            report.output_rows,
            report.dropped()
        );
        for row in cleaned.iter().take(PREVIEW_ROWS) {
            info!(
                "  {} | {} | {} | {} | {} | {}",
                row.title,
                row.kind,
                row.genre,
                row.year,
                row.rating.as_deref().unwrap_or(""),
                row.region
            );
        }

        write_table(output, &cleaned)
            .with_context(|| format!("Failed to write cleaned table {}", output.display()))?;
        info!("Cleaned dataset saved as {:?}", output);

        Ok(report)
    }
}

/// The part of a comma-joined list before the first comma, trimmed.
///
/// A value without a comma is returned trimmed.
pub fn first_token(value: &str) -> String {
    value.split(',').next().unwrap_or(value).trim().to_string()
}

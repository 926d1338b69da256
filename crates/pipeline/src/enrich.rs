//! External ratings enrichment.
//!
//! ## Algorithm
//! 1. Collect distinct (title, year) keys in first-seen order
//! 2. For each key, one throttled lookup: search by title, take the first
//!    candidate whose year equals the key's year, fetch its details
//! 3. Left-join the results back onto every cleaned row
//!
//! A failed or unmatched lookup yields empty metadata for that key and the
//! run continues. There are no retries.

use crate::throttle::Throttle;
use anyhow::{Context, Result};
use data_loader::{
    CleanedRecord, EnrichedRecord, EnrichmentKey, ExternalMetadata, TableRow, read_table,
    write_table,
};
use metadata_client::TitleLookup;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Minimum idle time between two lookups
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(200);

/// Result of looking up a single key
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Matched(ExternalMetadata),
    /// The search succeeded but no candidate had the exact year
    NoMatch,
    /// Search or detail fetch raised an error
    Failed,
}

impl LookupOutcome {
    pub fn into_metadata(self) -> ExternalMetadata {
        match self {
            LookupOutcome::Matched(metadata) => metadata,
            LookupOutcome::NoMatch | LookupOutcome::Failed => ExternalMetadata::missing(),
        }
    }
}

/// Counts observed during an enrichment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub rows: usize,
    pub distinct_keys: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
}

/// Enriches cleaned rows through a [`TitleLookup`].
pub struct Enricher<L> {
    lookup: L,
    throttle: Throttle,
}

impl<L: TitleLookup> Enricher<L> {
    /// Create an enricher with the default 200ms delay between lookups
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            throttle: Throttle::new(DEFAULT_LOOKUP_DELAY),
        }
    }

    /// Configure the delay between lookups (default: 200ms)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.throttle = Throttle::new(delay);
        self
    }

    /// Look up a single key without throttling. Never fails.
    pub fn lookup_key(&self, key: &EnrichmentKey) -> LookupOutcome {
        lookup_one(&self.lookup, key)
    }

    /// Look up every key once, in order, throttled.
    pub fn lookup_all(
        &mut self,
        keys: &[EnrichmentKey],
    ) -> (HashMap<EnrichmentKey, ExternalMetadata>, EnrichReport) {
        let Self { lookup, throttle } = self;
        let mut results = HashMap::with_capacity(keys.len());
        let mut report = EnrichReport {
            distinct_keys: keys.len(),
            ..Default::default()
        };

        info!(
            "Fetching metadata for {} titles ({:?} between requests)",
            keys.len(),
            throttle.delay()
        );
        for (i, key) in keys.iter().enumerate() {
            let outcome = throttle.run(|| lookup_one(&*lookup, key));
            match outcome {
                LookupOutcome::Matched(_) => report.matched += 1,
                LookupOutcome::NoMatch => report.unmatched += 1,
                LookupOutcome::Failed => report.failed += 1,
            }
            results.insert(key.clone(), outcome.into_metadata());

            if (i + 1) % 100 == 0 {
                info!("Looked up {}/{} titles", i + 1, keys.len());
            }
        }

        (results, report)
    }

    /// Enrich rows in memory
    pub fn enrich_records(&mut self, records: Vec<CleanedRecord>) -> (Vec<EnrichedRecord>, EnrichReport) {
        let keys = distinct_keys(&records);
        let (results, mut report) = self.lookup_all(&keys);
        let enriched = merge(records, &results);
        report.rows = enriched.len();
        (enriched, report)
    }

    /// Read the cleaned table at `input`, enrich it and write `output`.
    ///
    /// `output` is overwritten.
    pub fn enrich_file(&mut self, input: &Path, output: &Path) -> Result<EnrichReport> {
        info!("Loading cleaned catalog from {:?}", input);
        let table = read_table::<CleanedRecord>(input, CleanedRecord::COLUMNS)
            .with_context(|| format!("Failed to read cleaned table {}", input.display()))?;

        let (enriched, report) = self.enrich_records(table.rows);

        write_table(output, &enriched)
            .with_context(|| format!("Failed to write enriched table {}", output.display()))?;
        info!(
            "Enrichment done: {} rows, {} titles ({} matched, {} unmatched, {} failed). Saved as {:?}",
            report.rows,
            report.distinct_keys,
            report.matched,
            report.unmatched,
            report.failed,
            output
        );
        Ok(report)
    }
}

#[instrument(skip_all, fields(title = %key.title, year = key.year))]
fn lookup_one<L: TitleLookup + ?Sized>(lookup: &L, key: &EnrichmentKey) -> LookupOutcome {
    let candidates = match lookup.search(&key.title) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Lookup failed for {} ({}): {}", key.title, key.year, e);
            return LookupOutcome::Failed;
        }
    };

    let Some(candidate) = candidates.iter().find(|c| c.year == Some(key.year)) else {
        debug!("No candidate out of {} matched year {}", candidates.len(), key.year);
        return LookupOutcome::NoMatch;
    };

    match lookup.details(candidate) {
        Ok(details) => LookupOutcome::Matched(ExternalMetadata {
            rating: details.rating,
            votes: details.votes,
            genres: Some(details.genres.join(", ")),
        }),
        Err(e) => {
            warn!("Detail fetch failed for {} ({}): {}", key.title, key.year, e);
            LookupOutcome::Failed
        }
    }
}

/// Distinct (title, year) keys in first-seen order
pub fn distinct_keys(records: &[CleanedRecord]) -> Vec<EnrichmentKey> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(CleanedRecord::key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Left join: every row is kept, keys without a result get empty metadata.
pub fn merge(
    records: Vec<CleanedRecord>,
    results: &HashMap<EnrichmentKey, ExternalMetadata>,
) -> Vec<EnrichedRecord> {
    let missing = ExternalMetadata::missing();
    records
        .into_iter()
        .map(|record| {
            let metadata = results.get(&record.key()).unwrap_or(&missing);
            EnrichedRecord::new(record, metadata)
        })
        .collect()
}

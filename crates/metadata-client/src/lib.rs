//! Title metadata client for the external ratings service.
//!
//! This crate provides:
//! - The `TitleLookup` trait: search by title, then fetch details for one
//!   candidate
//! - `OmdbClient`, a blocking HTTP implementation against the OMDb API
//! - `LookupError` for transport and response failures
//!
//! Callers decide what a failure means; the enricher turns every
//! `LookupError` into empty metadata for that title.

pub mod omdb;

pub use omdb::{OmdbClient, OmdbConfig};

use thiserror::Error;

/// Errors that can occur when talking to the metadata service
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned status {status}")]
    Status { status: u16 },

    #[error("Metadata service error: {0}")]
    Service(String),

    #[error("Invalid response from metadata service: {0}")]
    InvalidResponse(String),
}

/// One search hit, in the order the service ranked it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    /// Service-specific id used for the detail fetch
    pub id: String,
    pub title: String,
    /// Release (or first-air) year, when the service reports one
    pub year: Option<i32>,
}

/// Ratings data for a single candidate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleDetails {
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub genres: Vec<String>,
}

/// Search-then-fetch access to a title metadata service.
///
/// Implementations are called strictly one request at a time.
pub trait TitleLookup {
    /// Candidates for `title`, best match first. No match is `Ok(vec![])`.
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError>;

    /// Full ratings data for a candidate returned by `search`
    fn details(&self, candidate: &SearchCandidate) -> Result<TitleDetails, LookupError>;
}

impl<T: TitleLookup + ?Sized> TitleLookup for &T {
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        (**self).search(title)
    }

    fn details(&self, candidate: &SearchCandidate) -> Result<TitleDetails, LookupError> {
        (**self).details(candidate)
    }
}

impl<T: TitleLookup + ?Sized> TitleLookup for Box<T> {
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        (**self).search(title)
    }

    fn details(&self, candidate: &SearchCandidate) -> Result<TitleDetails, LookupError> {
        (**self).details(candidate)
    }
}

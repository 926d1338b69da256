//! Blocking OMDb API client.
//!
//! Search: `GET {base}?apikey=..&s=<title>` returns up to ten hits with a
//! `Year` such as `"2015"` or `"2015–2018"`. Details: `GET {base}?apikey=..&i=<imdbID>`
//! returns `imdbRating`, `imdbVotes` ("1,234,567") and `Genre`
//! ("Crime, Drama"). Missing values are reported as `"N/A"`.

use crate::{LookupError, SearchCandidate, TitleDetails, TitleLookup};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`OmdbClient`]
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
    /// Upper bound on a single request
    pub timeout: Duration,
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the service address (default: https://www.omdbapi.com/)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout (default: 30s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OMDb-backed [`TitleLookup`].
///
/// One `reqwest` client is reused for every request.
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl OmdbClient {
    /// Build the HTTP client. No request is made until the first lookup.
    pub fn new(config: OmdbConfig) -> Result<Self, LookupError> {
        info!("Using metadata service at {}", config.base_url);
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("reelscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Address of the service this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn get<T: for<'de> Deserialize<'de>>(&self, query: &[(&str, &str)]) -> Result<T, LookupError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("apikey", self.config.api_key.as_str())])
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| LookupError::InvalidResponse(e.to_string()))
    }
}

impl TitleLookup for OmdbClient {
    fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        debug!("Searching metadata service for '{}'", title);
        let response: SearchResponse = self.get(&[("s", title)])?;
        response.into_candidates()
    }

    fn details(&self, candidate: &SearchCandidate) -> Result<TitleDetails, LookupError> {
        debug!("Fetching details for {} ({})", candidate.title, candidate.id);
        let response: DetailResponse = self.get(&[("i", candidate.id.as_str())])?;
        response.into_details()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

impl SearchResponse {
    fn into_candidates(self) -> Result<Vec<SearchCandidate>, LookupError> {
        if self.response != "True" {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            // "Movie not found!" is an empty result set, not a failure
            if message.to_lowercase().contains("not found") {
                return Ok(Vec::new());
            }
            return Err(LookupError::Service(message));
        }

        Ok(self
            .search
            .into_iter()
            .map(|hit| SearchCandidate {
                year: parse_year(&hit.year),
                id: hit.imdb_id,
                title: hit.title,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    votes: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl DetailResponse {
    fn into_details(self) -> Result<TitleDetails, LookupError> {
        if self.response != "True" {
            return Err(LookupError::Service(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(TitleDetails {
            rating: available(self.rating.as_deref()).and_then(|r| r.parse().ok()),
            votes: available(self.votes.as_deref()).and_then(parse_votes),
            genres: available(self.genre.as_deref())
                .map(|g| {
                    g.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn available(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "N/A")
}

/// Leading four-digit year: "2015" and "2015–2018" both give 2015
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// "1,234,567" -> 1234567
fn parse_votes(raw: &str) -> Option<u64> {
    raw.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2015"), Some(2015));
        assert_eq!(parse_year("2015–2018"), Some(2015));
        assert_eq!(parse_year("2019–"), Some(2019));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_parse_votes() {
        assert_eq!(parse_votes("1,234,567"), Some(1_234_567));
        assert_eq!(parse_votes("87"), Some(87));
        assert_eq!(parse_votes("lots"), None);
    }

    #[test]
    fn test_search_response_keeps_service_order() {
        let body = r#"{"Search":[
            {"Title":"Dark","Year":"2017–2020","imdbID":"tt5753856","Type":"series","Poster":"N/A"},
            {"Title":"Dark","Year":"2005","imdbID":"tt0443521","Type":"movie","Poster":"N/A"}
        ],"totalResults":"2","Response":"True"}"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let candidates = response.into_candidates().unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "tt5753856");
        assert_eq!(candidates[0].year, Some(2017));
        assert_eq!(candidates[1].year, Some(2005));
    }

    #[test]
    fn test_not_found_is_empty() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert!(response.into_candidates().unwrap().is_empty());
    }

    #[test]
    fn test_service_error_is_an_error() {
        let body = r#"{"Response":"False","Error":"Request limit reached!"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert!(matches!(
            response.into_candidates(),
            Err(LookupError::Service(ref m)) if m == "Request limit reached!"
        ));
    }

    #[test]
    fn test_detail_response() {
        let body = r#"{"Title":"Dark","Year":"2017–2020","Genre":"Crime, Drama, Mystery",
            "imdbRating":"8.7","imdbVotes":"412,345","imdbID":"tt5753856","Response":"True"}"#;

        let response: DetailResponse = serde_json::from_str(body).unwrap();
        let details = response.into_details().unwrap();

        assert_eq!(details.rating, Some(8.7));
        assert_eq!(details.votes, Some(412_345));
        assert_eq!(details.genres, vec!["Crime", "Drama", "Mystery"]);
    }

    #[test]
    fn test_detail_not_available_fields() {
        let body = r#"{"Title":"Obscure","Genre":"N/A","imdbRating":"N/A","imdbVotes":"N/A","Response":"True"}"#;

        let response: DetailResponse = serde_json::from_str(body).unwrap();
        let details = response.into_details().unwrap();

        assert_eq!(details, TitleDetails::default());
    }

    #[test]
    fn test_config_builder() {
        let config = OmdbConfig::new("secret")
            .with_base_url("http://localhost:8080/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_client_reports_base_url() {
        let client = OmdbClient::new(OmdbConfig::new("secret").with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/");

        let client = OmdbClient::new(OmdbConfig::new("secret")).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}

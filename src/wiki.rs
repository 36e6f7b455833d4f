//! Fetch boundary: turning a wiki page reference into raw tables.
//!
//! The application only depends on the [`TableSource`] trait; the
//! production implementation talks to the wikitable2json service.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

/// A raw table as delivered by the extraction service: row 0 is the
/// header, body rows may be shorter than the header.
pub type RawTable = Vec<Vec<String>>;

/// Converts a wiki page reference into structured tables.
pub trait TableSource {
    /// Fetch every table on `page` in language `lang`, optionally with
    /// reference link texts removed.
    fn tables(&self, page: &str, lang: &str, clean_refs: bool) -> Result<Vec<RawTable>, FetchError>;
}

/// Failure talking to or decoding the table-extraction service.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure or non-success status
    Request(String),
    /// Response body was not the expected table matrix
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(msg) => write!(f, "fetching tables: {msg}"),
            FetchError::Decode(msg) => write!(f, "decoding table response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Error body returned by the service on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

const API_BASE: &str = "https://www.wikitable2json.com/api";

/// HTTP client for the wikitable2json API.
pub struct WikiClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl WikiClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new(),
            user_agent: user_agent.into(),
        }
    }
}

impl TableSource for WikiClient {
    fn tables(&self, page: &str, lang: &str, clean_refs: bool) -> Result<Vec<RawTable>, FetchError> {
        let url = format!("{API_BASE}/{page}");
        debug!(page, lang, clean_refs, "fetching tables");

        let response = self
            .agent
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .query("lang", lang)
            .query("cleanRef", if clean_refs { "true" } else { "false" })
            .call()
            .map_err(|err| match err {
                // Prefer the service's own message when it sent one
                ureq::Error::Status(code, response) => {
                    match response.into_json::<ApiError>() {
                        Ok(api_err) => FetchError::Request(api_err.message),
                        Err(_) => FetchError::Request(format!("status {code}")),
                    }
                }
                ureq::Error::Transport(transport) => {
                    FetchError::Request(transport.to_string())
                }
            })?;

        let tables: Vec<RawTable> = response
            .into_json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(page, count = tables.len(), "tables fetched");
        Ok(tables)
    }
}

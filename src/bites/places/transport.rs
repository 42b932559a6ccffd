use crate::error::{BitesError, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

const USER_AGENT_VALUE: &str = concat!("bites/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Autocomplete,
    Details,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Autocomplete => "autocomplete/json",
            Endpoint::Details => "details/json",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Autocomplete => write!(f, "autocomplete"),
            Endpoint::Details => write!(f, "details"),
        }
    }
}

/// Raw GET access to the places service.
///
/// Returns the response body. Transport problems and non-2xx statuses
/// are `LookupFailed`; interpreting the body is the client's job.
pub trait PlacesTransport {
    fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String>;
}

/// HTTP transport over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| BitesError::lookup(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path());
        Url::parse_with_params(&raw, params)
            .map_err(|e| BitesError::lookup(format!("invalid places URL {}: {}", raw, e)))
    }
}

impl PlacesTransport for HttpTransport {
    fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<String> {
        let url = self.url(endpoint, params)?;
        debug!(%endpoint, host = url.host_str().unwrap_or(""), "places request");

        // without_url(): the query string carries the API key
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BitesError::lookup(format!("{} request failed: {}", endpoint, e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BitesError::lookup(format!(
                "{} request returned HTTP {}",
                endpoint, status
            )));
        }

        response
            .text()
            .map_err(|e| BitesError::lookup(format!("{} response unreadable: {}", endpoint, e.without_url())))
    }
}

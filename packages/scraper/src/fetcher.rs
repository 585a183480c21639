//! The fetch boundary: one blocking GET per page.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{ScrapeConfig, ScrapeError};

/// Retrieves the raw body of a page.
///
/// Implementations perform exactly one request per call and never retry.
pub trait PageFetcher {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the request fails or the server answers
    /// with an error status.
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`PageFetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    delay: Option<Duration>,
}

impl HttpFetcher {
    /// Builds a fetcher sending the configured headers with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] for an invalid header name or value,
    /// or [`ScrapeError::Http`] if the client cannot be built.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut header_map = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScrapeError::parse(format!("invalid header name '{key}': {e}")))?;
            let val = HeaderValue::from_str(value)
                .map_err(|e| ScrapeError::parse(format!("invalid header value '{value}': {e}")))?;
            header_map.insert(name, val);
        }

        let client = reqwest::blocking::Client::builder()
            .default_headers(header_map)
            .build()?;

        Ok(Self {
            client,
            delay: config.delay_ms.map(Duration::from_millis),
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        log::debug!("GET {url}");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        log::debug!("Fetched {} bytes from {url}", body.len());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        Ok(body)
    }
}

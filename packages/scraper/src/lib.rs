#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page-extraction pipeline for legacy movie-database title and name pages.
//!
//! A scrape walks a chain of dependent pages: the search page for a free-text
//! query, the canonical detail page of the first result, and the detail
//! page's sub-pages (full credits for titles, awards and bio for people).
//!
//! - [`navigator`] builds every URL in that chain and tags the loaded page as
//!   a title or person context.
//! - [`fetcher`] performs one blocking GET per page.
//! - [`extract`] holds the field extractors, each a pure function over one
//!   parsed page.
//! - [`assemble`] composes extractor output into [`amdb_film_models`] records.
//! - [`session`] ties them together and caches each fetched page for the
//!   lifetime of the loaded context.

pub mod assemble;
pub mod extract;
pub mod fetcher;
pub mod navigator;
pub mod session;
pub mod text;

mod dom;

#[cfg(test)]
mod fixtures;

use std::collections::BTreeMap;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use navigator::{ContextKind, PageContext, SubPage};
pub use session::ScrapeSession;

/// Default site every URL is built against.
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";

/// Errors that can occur while navigating and extracting pages.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The operation needs a different kind of page than the one loaded.
    #[error("Invalid context: {message}")]
    InvalidContext {
        /// Which page kind was expected and what was loaded instead.
        message: String,
    },

    /// The search page had no results.
    #[error("No search results for '{query}'")]
    NotFound {
        /// The query that was searched for.
        query: String,
    },

    /// A required field could not be located or parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what could not be parsed.
        message: String,
    },

    /// A credits table listed a different number of names than roles.
    #[error("Malformed credits: {names} names but {roles} roles")]
    MalformedCredits {
        /// Number of person names found.
        names: usize,
        /// Number of role annotations found.
        roles: usize,
    },
}

impl ScrapeError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_context(message: impl Into<String>) -> Self {
        Self::InvalidContext {
            message: message.into(),
        }
    }
}

/// Configuration for page fetching.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root every search and detail URL is built against.
    pub base_url: String,
    /// Additional HTTP headers to include in requests.
    pub headers: BTreeMap<String, String>,
    /// Delay in milliseconds after each page fetch.
    pub delay_ms: Option<u64>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ScrapeConfig {
    /// Creates a new `ScrapeConfig` against the given site root.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            headers: BTreeMap::new(),
            delay_ms: None,
        }
    }

    /// Sets the delay after each page fetch.
    #[must_use]
    pub const fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }

    /// Adds an HTTP header to include in requests.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        let config = ScrapeConfig::new("https://example.test/").with_delay_ms(250);
        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.delay_ms, Some(250));
    }

    #[test]
    fn default_config_targets_default_site() {
        let config = ScrapeConfig::default().with_header("Accept-Language", "en-US");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.headers["Accept-Language"], "en-US");
    }
}

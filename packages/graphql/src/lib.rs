#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GraphQL sink for scraped records.
//!
//! Every write is a named [`Operation`] backed by a stored document and a
//! map of named variables. [`GraphqlClient`] sends them over HTTP;
//! [`AmdbService`] maps records onto operations and keeps failed writes
//! from stopping the rest of a load.

pub mod client;
pub mod operations;
pub mod retry;
pub mod service;

pub use client::GraphqlClient;
pub use operations::Operation;
pub use service::AmdbService;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/graphql";

/// Transport retries used when none are configured.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Named variables bound into an operation document.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur while executing an operation.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status that is not retried.
    #[error("Unexpected status: {status}")]
    Status {
        /// Status line, e.g. `400 Bad Request`.
        status: String,
    },

    /// The server executed the operation and reported errors.
    #[error("{operation} failed: {message}")]
    Execution {
        /// Name of the operation.
        operation: String,
        /// Error messages reported by the server.
        message: String,
    },
}

/// Executes named operations.
pub trait OperationExecutor {
    /// Runs `operation` with `variables` and returns the response `data`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the operation could not be delivered or the
    /// server reported errors.
    fn execute(
        &self,
        operation: Operation,
        variables: Variables,
    ) -> Result<serde_json::Value, SinkError>;
}

/// Configuration for the GraphQL transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlConfig {
    /// Endpoint every operation is posted to.
    pub endpoint: String,
    /// Retries for transport failures, rate limiting and server errors.
    pub max_retries: u32,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl GraphqlConfig {
    /// Creates a config posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

//! HTTP client for downloading market data exports.

use reqwest::Client;
use sixtick_types::{SixtickError, TickSeries};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::export::{ExportError, parse_export};
use crate::url::{DEFAULT_ENDPOINT, ID_PARAM, is_not_found};

/// Configuration for the export client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Export endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// How many times a transport failure is retried.
    pub max_retries: u32,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            user_agent: format!("sixtick/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while fetching an export.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The exchange does not know the security. Not retried.
    #[error("Security {0} is not found.")]
    NotFound(String),

    /// Transport failures persisted through every retry.
    #[error("Failed to connect to {url} after {attempts} attempts: {source}")]
    Connectivity {
        /// The endpoint that could not be reached.
        url: String,
        /// Total attempts made.
        attempts: u32,
        /// The last transport error.
        source: reqwest::Error,
    },

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// Non-retryable HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body did not have the export layout.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<FetchError> for SixtickError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(id) => Self::SecurityNotFound(id),
            FetchError::Connectivity { url, .. } => Self::Connectivity(url),
            FetchError::Export(e) => e.into(),
            other @ (FetchError::ServerError { .. } | FetchError::Http(_)) => {
                Self::Http(other.to_string())
            }
        }
    }
}

/// HTTP client for the exchange's market data export.
#[derive(Debug, Clone)]
pub struct ExportClient {
    client: Client,
    config: ClientConfig,
}

impl ExportClient {
    /// Creates a new export client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Downloads the raw export text for a symbol or ISIN.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] if the exchange redirects to its
    /// not-found page, or [`FetchError::Connectivity`] once transport
    /// retries are exhausted.
    pub async fn download(&self, symbol_or_isin: &str) -> Result<String, FetchError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            let request = self
                .client
                .get(&self.config.endpoint)
                .query(&[(ID_PARAM, symbol_or_isin)]);

            match request.send().await {
                Ok(response) => {
                    if is_not_found(response.url().as_str()) {
                        return Err(FetchError::NotFound(symbol_or_isin.to_string()));
                    }
                    if !response.status().is_success() {
                        return Err(FetchError::ServerError {
                            status: response.status().as_u16(),
                        });
                    }
                    debug!(security = symbol_or_isin, attempts, "export downloaded");
                    return Ok(response.text().await?);
                }
                Err(e) if self.is_retryable_error(&e) => {
                    if attempts > self.config.max_retries {
                        return Err(FetchError::Connectivity {
                            url: self.config.endpoint.clone(),
                            attempts,
                            source: e,
                        });
                    }
                    warn!(security = symbol_or_isin, attempts, error = %e, "retrying export download");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Downloads and parses the export for a symbol or ISIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the export is malformed.
    pub async fn grab(&self, symbol_or_isin: &str) -> Result<TickSeries, FetchError> {
        let raw = self.download(symbol_or_isin).await?;
        Ok(parse_export(&raw)?)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(&self, error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }

        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

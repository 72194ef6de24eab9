//! Connection records from an HTTP endpoint.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::graph::{ConnectionRecord, retain_named};

use super::EdgeSource;
use super::error::SourceError;

/// Wrapper for the edges response.
#[derive(Debug, Deserialize)]
pub struct EdgesResponse {
    pub edges: Vec<ConnectionRecord>,
}

/// Configuration for the HTTP edge source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Full URL of the edges endpoint
    pub url: String,
    /// Optional API key sent as the x-apikey header
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    /// Create a new config for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Set an API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Fetches connection records from an HTTP endpoint returning
/// `{"edges": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Create a new HTTP source.
    pub fn new(config: HttpSourceConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();

        if let Some(api_key) = &config.api_key {
            let api_key_header = HeaderValue::from_str(api_key).map_err(|_| SourceError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), api_key_header);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }
}

impl EdgeSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: EdgesResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Json {
                message: e.to_string(),
            })?;

        let total = response.edges.len();
        let records = retain_named(response.edges);
        debug!(
            url = %self.url,
            total,
            kept = records.len(),
            "Fetched connection records"
        );

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

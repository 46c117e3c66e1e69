//! Outbound user search against the remote endpoint.
//!
//! The HTTP exchange sits behind [`SearchTransport`]; [`SearchGateway`] owns
//! the request shape and the status classification so both can be exercised
//! without a network.

use anyhow::{Context, Result};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::types::{ApiErrorBody, SearchResponse, UserRecord};

/// Status the endpoint uses to signal rate limiting.
pub const RATE_LIMIT_STATUS: u16 = 403;

/// Why a search produced no usable result set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The endpoint refused the request for quota reasons; try later.
    #[error("rate limited: {message}")]
    RateLimited { message: String },
    /// Any other non-success status, transport or decode error.
    #[error("request failed: {message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },
}

impl SearchFailure {
    /// Whether the current result set should survive this failure.
    pub fn keeps_results(&self) -> bool {
        matches!(self, SearchFailure::RateLimited { .. })
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub trait SearchTransport: Send + Sync {
    /// Perform a GET for `url`. `Err` means no response arrived at all.
    fn fetch(&self, url: &str) -> Result<RawResponse>;
}

/// Blocking reqwest transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

impl SearchTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .context("sending search request")?;
        let status = response.status().as_u16();
        let body = response.text().context("reading search response body")?;
        Ok(RawResponse { status, body })
    }
}

pub struct SearchGateway {
    endpoint: String,
    transport: Box<dyn SearchTransport>,
}

impl SearchGateway {
    pub fn new(endpoint: impl Into<String>, transport: Box<dyn SearchTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Gateway wired to the real HTTP transport.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let transport = HttpTransport::new(cfg.http_timeout(), &cfg.user_agent)?;
        Ok(Self::new(cfg.endpoint.clone(), Box::new(transport)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }

    /// Run one search. A blank query returns an empty set without touching
    /// the transport.
    pub fn search(&self, query: &str) -> Result<Vec<UserRecord>, SearchFailure> {
        let query = query.trim();
        if query.is_empty() {
            debug!("search: blank query, skipping request");
            return Ok(Vec::new());
        }

        let url = self.request_url(query);
        info!(query = query, "search_start");
        let response = self.transport.fetch(&url).map_err(|e| {
            warn!(query = query, "search transport error: {e:#}");
            SearchFailure::RequestFailed {
                status: None,
                message: format!("{e:#}"),
            }
        })?;
        classify(response)
    }
}

/// Map a completed exchange onto the result set or a failure.
pub fn classify(response: RawResponse) -> Result<Vec<UserRecord>, SearchFailure> {
    let RawResponse { status, body } = response;

    if (200..300).contains(&status) {
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchFailure::RequestFailed {
                status: Some(status),
                message: format!("parsing search response: {e}"),
            })?;
        info!(
            status = status,
            total = parsed.total_count,
            incomplete = parsed.incomplete_results,
            returned = parsed.items.len(),
            "search_done"
        );
        return Ok(parsed.items);
    }

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("endpoint returned status {status}"));

    if status == RATE_LIMIT_STATUS {
        warn!(status = status, "search rate limited: {message}");
        return Err(SearchFailure::RateLimited { message });
    }
    warn!(status = status, "search failed: {message}");
    Err(SearchFailure::RequestFailed {
        status: Some(status),
        message,
    })
}

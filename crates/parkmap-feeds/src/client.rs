//! HTTP client for the municipal open-data (Socrata) parking feeds.
//!
//! Wraps `reqwest` with feed-specific URL handling, status checking, and
//! row-level deserialization. Both feeds are plain `GET`s returning a JSON
//! array of rows.

use std::time::Duration;

use parkmap_core::{AppConfig, RawLotRecord, RawZoneRecord, DEFAULT_LOTS_URL, DEFAULT_ZONES_URL};
use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::parse::parse_rows;
use crate::source::FeedSource;

const DEFAULT_USER_AGENT: &str = "parkmap/0.1 (parking-search)";

/// Client for the lots and zones datasets.
///
/// Use [`OpenDataClient::new`] for the production City of Calgary endpoints
/// or [`OpenDataClient::with_urls`] to point at a mock server in tests.
pub struct OpenDataClient {
    client: Client,
    lots_url: Url,
    zones_url: Url,
    row_limit: Option<u32>,
}

impl OpenDataClient {
    /// Creates a client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, FeedError> {
        Self::with_urls(
            DEFAULT_LOTS_URL,
            DEFAULT_ZONES_URL,
            timeout_secs,
            DEFAULT_USER_AGENT,
        )
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the HTTP client cannot be built, or
    /// [`FeedError::InvalidUrl`] if either configured URL is malformed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Ok(Self::with_urls(
            &config.lots_url,
            &config.zones_url,
            config.feed_timeout_secs,
            &config.feed_user_agent,
        )?
        .with_row_limit(config.feed_row_limit))
    }

    /// Creates a client with custom feed URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::InvalidUrl`] if either URL
    /// does not parse.
    pub fn with_urls(
        lots_url: &str,
        zones_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            lots_url: parse_url(lots_url)?,
            zones_url: parse_url(zones_url)?,
            row_limit: None,
        })
    }

    /// Caps the number of rows requested per feed via Socrata's `$limit`.
    #[must_use]
    pub fn with_row_limit(mut self, row_limit: Option<u32>) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Appends the row limit, if any, to a feed URL.
    fn build_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Some(limit) = self.row_limit {
            url.query_pairs_mut()
                .append_pair("$limit", &limit.to_string());
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on network failure or a non-2xx status.
    /// Returns [`FeedError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FeedError> {
        tracing::debug!(%url, "requesting feed");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl FeedSource for OpenDataClient {
    async fn fetch_lots(&self) -> Result<Vec<RawLotRecord>, FeedError> {
        let url = self.build_url(&self.lots_url);
        let body = self.request_json(&url).await?;
        let lots = parse_rows(body, "lots")?;
        tracing::info!(count = lots.len(), "fetched parking lots");
        Ok(lots)
    }

    async fn fetch_zones(&self) -> Result<Vec<RawZoneRecord>, FeedError> {
        let url = self.build_url(&self.zones_url);
        let body = self.request_json(&url).await?;
        let zones = parse_rows(body, "zones")?;
        tracing::info!(count = zones.len(), "fetched parking zones");
        Ok(zones)
    }
}

fn parse_url(raw: &str) -> Result<Url, FeedError> {
    Url::parse(raw).map_err(|e| FeedError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

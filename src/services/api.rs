use crate::config::ApiSettings;
use crate::models::{FilterQuery, PropertySummary, StatsSummary};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Marketplace API client
///
/// Read-only access to the two endpoints the listings page needs:
/// - `GET /api/stats`
/// - `GET /api/properties`, optionally filtered
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stats_url(&self) -> String {
        format!("{}/api/stats", self.base_url)
    }

    /// Listings URL; the query string is only appended when a filter is set
    pub fn properties_url(&self, query: &FilterQuery) -> String {
        if query.is_empty() {
            format!("{}/api/properties", self.base_url)
        } else {
            format!("{}/api/properties?{}", self.base_url, query.to_query_string())
        }
    }

    /// Fetch aggregate statistics
    pub async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
        self.get_json(&self.stats_url()).await
    }

    /// Fetch listings matching the filter
    pub async fn get_properties(
        &self,
        query: &FilterQuery,
    ) -> Result<Vec<PropertySummary>, ApiError> {
        self.get_json(&self.properties_url(query)).await
    }

    /// Fetch a single listing by id
    pub async fn get_property(&self, id: u64) -> Result<PropertySummary, ApiError> {
        let url = format!("{}/api/properties/{}", self.base_url, id);
        match self.get_json(&url).await {
            Err(ApiError::Status(404)) => {
                Err(ApiError::NotFound(format!("Property {} not found", id)))
            }
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::debug!("GET {} returned {}: {}", url, status, body);
            }
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", url, e)))
    }
}

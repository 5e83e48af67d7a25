//! Upstream stats API calls with response classification and reshaping

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::http_client::create_http_client_with_timeout;
use super::urls::{UpstreamQuery, build_league_player_stats_url};
use crate::config::Config;
use crate::error::AppError;
use crate::reshape::{Reshaped, reshape};

/// Client for the NBA stats API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    api_base_url: String,
}

impl StatsClient {
    /// Builds a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds).map_err(|e| {
            AppError::config_error(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self::new(client, &config.api_base_url))
    }

    pub fn new(client: Client, api_base_url: &str) -> Self {
        Self {
            client,
            api_base_url: api_base_url.to_string(),
        }
    }

    /// Fetches league player stats and reshapes the response
    pub async fn league_player_stats(&self, query: &UpstreamQuery) -> Result<Reshaped, AppError> {
        let url = build_league_player_stats_url(&self.api_base_url);
        fetch_reshaped(&self.client, &url, query).await
    }
}

/// Issues a single GET to `url` and reshapes the JSON body.
///
/// No retries are attempted; the first failure is returned.
///
/// # Errors
/// * `AppError::UpstreamTimeout` - the request exceeded the client timeout
/// * `AppError::UpstreamTransport` - connection, DNS or other transport failure
/// * `AppError::UpstreamStatus` - the API answered with anything but 200
/// * `AppError::Format` - the body is not JSON or its result sets are malformed
#[instrument(skip(client))]
pub async fn fetch_reshaped(
    client: &Client,
    url: &str,
    query: &UpstreamQuery,
) -> Result<Reshaped, AppError> {
    info!("Fetching data from URL: {url}");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    debug!("Response status: {status}");

    if status != StatusCode::OK {
        error!(
            "HTTP {} - {} (URL: {})",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error"),
            url
        );
        return Err(AppError::upstream_status(status.as_u16(), url));
    }

    let response_text = response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    debug!("Response length: {} bytes", response_text.len());

    let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, url);
        error!(
            "Response text (first 200 chars): {}",
            &response_text.chars().take(200).collect::<String>()
        );
        AppError::format_error(e.to_string())
    })?;

    reshape(payload).inspect_err(|e| error!("Failed to reshape API response: {e} (URL: {url})"))
}

fn classify_transport_error(url: &str, e: reqwest::Error) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::upstream_timeout(url)
    } else {
        AppError::upstream_transport(url, e.to_string())
    }
}

//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use std::time::Duration;

use crate::constants::browser_headers;

/// Headers sent on every upstream request, regardless of endpoint.
///
/// The stats API refuses clients that do not look like a browser on nba.com.
/// `Host` is not listed here; reqwest derives it from the request URL.
pub fn browser_header_map() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(browser_headers::USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(browser_headers::ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(browser_headers::ACCEPT_LANGUAGE),
    );
    headers.insert(CONNECTION, HeaderValue::from_static(browser_headers::CONNECTION));
    headers.insert(ORIGIN, HeaderValue::from_static(browser_headers::ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(browser_headers::REFERER));
    headers
}

/// Creates the HTTP client used for upstream calls.
///
/// # Features
/// * Fixed timeout covering connect and read for each request
/// * Browser-identifying default headers
/// * Connection pooling with a bounded number of idle connections per host
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .default_headers(browser_header_map())
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

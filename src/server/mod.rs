//! HTTP surface: route table, JSON fallbacks, CORS and request logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::error::AppError;
use crate::rate_limit::RateLimiter;
use crate::upstream::StatsClient;
use crate::validators::{query_params, require_params};

pub mod handlers;

/// Request headers browsers may list in a CORS preflight
const CORS_ALLOWED_HEADERS: &[&str] = &[
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-type",
    "origin",
    "x-requested-with",
];

use handlers::json_error;

/// Shared handler dependencies
#[derive(Debug, Clone)]
pub struct AppState {
    pub stats: StatsClient,
    pub limiter: Arc<RateLimiter>,
    pub default_season: String,
}

impl AppState {
    pub fn new(stats: StatsClient, limiter: Arc<RateLimiter>, default_season: &str) -> Self {
        Self {
            stats,
            limiter,
            default_season: default_season.to_string(),
        }
    }

    /// Builds the upstream client and a fresh rate limiter from config
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            StatsClient::from_config(config)?,
            Arc::new(RateLimiter::new(config.calls_per_second)),
            &config.default_season,
        ))
    }
}

/// The complete route table with CORS, error recovery and access logging
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET"])
        .allow_headers(CORS_ALLOWED_HEADERS.iter().copied());

    health_route()
        .or(player_stats_route(state.clone()))
        .or(search_route(state))
        .with(cors)
        .recover(handle_rejection)
        .with(warp::log::custom(log_request))
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn health_route() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "health")
        .and(warp::get())
        .and_then(handlers::health)
}

fn player_stats_route(
    state: AppState,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "nba" / "player" / String / "stats")
        .and(warp::get())
        .and(query_params())
        .and(with_state(state))
        .and_then(handlers::get_player_stats)
}

fn search_route(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "nba" / "player" / "search")
        .and(warp::get())
        .and(require_params(&["name"]))
        .and(with_state(state))
        .and_then(handlers::search_players)
}

/// Converts any rejection into a JSON error body
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let response = if err.is_not_found() {
        json_error("Not found", StatusCode::NOT_FOUND)
    } else if let Some(app_error) = err.find::<AppError>() {
        handlers::error_response(app_error)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        json_error("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        json_error("Invalid query string", StatusCode::BAD_REQUEST)
    } else if err.find::<warp::cors::CorsForbidden>().is_some() {
        json_error("Forbidden", StatusCode::FORBIDDEN)
    } else {
        error!("Unhandled rejection: {:?}", err);
        json_error("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
    };
    Ok(response)
}

fn log_request(info: warp::log::Info<'_>) {
    info!(
        "Request: {} {} Status: {} Duration: {:.2}s",
        info.method(),
        info.path(),
        info.status().as_u16(),
        info.elapsed().as_secs_f64()
    );
}

/// Binds `0.0.0.0:port` and serves until Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .map_err(|e| AppError::ServerBind(format!("{addr}: {e}")))?;

    info!("Server listening on http://{bound}");
    info!("Health check: http://localhost:{}/api/health", bound.port());

    server.await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, finishing in-flight requests");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn unreachable_state() -> AppState {
        let config = crate::testing_utils::TestDataBuilder::config("http://127.0.0.1:1");
        AppState::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = warp::test::request()
            .path("/api/health")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            body,
            json!({"status": "healthy", "message": "NBA Stats API is running"})
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = warp::test::request()
            .path("/api/nope")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/health")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_invalid_season_rejected_before_upstream_call() {
        let response = warp::test::request()
            .path("/api/nba/player/1/stats?season=2023-2024")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            body["error"],
            "Invalid season format. Use YYYY-YY format (e.g., 2023-24)"
        );
    }

    #[tokio::test]
    async fn test_search_requires_name() {
        let response = warp::test::request()
            .path("/api/nba/player/search?season=2023-24")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Missing required parameters: name");
    }

    #[tokio::test]
    async fn test_cors_header_on_cross_origin_request() {
        let response = warp::test::request()
            .path("/api/health")
            .header("Origin", "http://localhost:3000")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_with_request_headers() {
        let response = warp::test::request()
            .method("OPTIONS")
            .path("/api/nba/player/search?name=curry")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "GET")
            .header("Access-Control-Request-Headers", "content-type, authorization")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[tokio::test]
    async fn test_cors_preflight_rejects_other_methods() {
        let response = warp::test::request()
            .method("OPTIONS")
            .path("/api/health")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "DELETE")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_undecodable_player_id_is_400() {
        let response = warp::test::request()
            .path("/api/nba/player/%FF/stats")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["error"], "Invalid player ID");
    }

    #[tokio::test]
    async fn test_transport_failure_is_500_with_message() {
        let response = warp::test::request()
            .path("/api/nba/player/1/stats")
            .reply(&routes(unreachable_state()))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Request failed: ")
        );
    }
}

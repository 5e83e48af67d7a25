//! NBA Stats Proxy Library
//!
//! A thin REST façade over the NBA stats API. Upstream responses arrive as
//! columnar result sets (`headers` + `rowSet`) and are reshaped into lists of
//! records keyed by lower-cased header names. Upstream calls are throttled per
//! operation and request parameters are validated before anything goes out.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nba_stats_proxy::config::Config;
//! use nba_stats_proxy::error::AppError;
//! use nba_stats_proxy::server::{AppState, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     let state = AppState::from_config(&config)?;
//!     serve(state, config.port).await
//! }
//! ```
//!
//! Reshaping on its own:
//!
//! ```rust
//! use nba_stats_proxy::reshape::reshape;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "resultSets": [{
//!         "name": "PlayerStats",
//!         "headers": ["PLAYER_ID", "PTS"],
//!         "rowSet": [[1, 25.5]]
//!     }]
//! });
//! let reshaped = reshape(payload).unwrap();
//! assert_eq!(reshaped.records("playerstats")[0]["pts"], json!(25.5));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod rate_limit;
pub mod reshape;
pub mod server;
pub mod testing_utils;
pub mod upstream;
pub mod validators;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use rate_limit::RateLimiter;
pub use reshape::{Reshaped, ReshapedPayload, reshape};
pub use server::{AppState, routes, serve};
pub use upstream::{PlayerSummary, ResultSet, StatsClient};
pub use validators::{require_params, validate_season_format};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Application-wide constants and configuration defaults
//!
//! This module centralizes magic numbers, upstream parameters and environment
//! variable names so handlers and config loading agree on them.

/// Default base URL of the NBA stats API
pub const DEFAULT_API_BASE_URL: &str = "https://stats.nba.com/stats";

/// Default timeout for upstream HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of idle connections per host kept in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default number of upstream calls allowed per second for each gated operation
pub const DEFAULT_CALLS_PER_SECOND: f64 = 1.0;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default secret key
pub const DEFAULT_SECRET_KEY: &str = "dev";

/// Season used when a request does not name one
pub const DEFAULT_SEASON: &str = "2023-24";

/// Earliest season start year is exclusive: 1946-47 is rejected
pub const MIN_SEASON_START_YEAR_EXCLUSIVE: i32 = 1946;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "nba_stats_proxy";

/// Default log file name inside the log directory
pub const DEFAULT_LOG_FILE_NAME: &str = "nba_stats_proxy.log";

/// Upstream endpoint paths, relative to the API base URL
pub mod endpoints {
    /// League-wide player statistics, also used for single-player lookups
    pub const LEAGUE_PLAYER_STATS: &str = "leaguedashplayerstats";
}

/// Query parameter names and fixed values sent upstream
pub mod upstream_params {
    pub const PLAYER_ID: &str = "PlayerID";
    pub const PER_MODE: &str = "PerMode";
    pub const SEASON: &str = "Season";
    pub const SEASON_TYPE: &str = "SeasonType";

    pub const PER_GAME: &str = "PerGame";
    pub const REGULAR_SEASON: &str = "Regular Season";

    /// `PlayerID` value that asks for every player in the league
    pub const ALL_PLAYERS: &str = "0";
}

/// Browser-identifying headers sent on every upstream call.
/// The provider rejects requests that do not look like they come from nba.com.
pub mod browser_headers {
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
    pub const ACCEPT: &str = "application/json";
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
    pub const CONNECTION: &str = "keep-alive";
    pub const ORIGIN: &str = "https://www.nba.com";
    pub const REFERER: &str = "https://www.nba.com/";
}

/// Rate limiter operation keys
pub mod operations {
    pub const GET_PLAYER_STATS: &str = "get_player_stats";
    pub const SEARCH_PLAYERS: &str = "search_players";
}

/// Result set and record field names used by the player search
pub mod fields {
    pub const LEAGUE_DASH_PLAYER_STATS: &str = "leaguedashplayerstats";
    pub const PLAYER_ID: &str = "player_id";
    pub const PLAYER_NAME: &str = "player_name";
    pub const TEAM_ABBREVIATION: &str = "team_abbreviation";
    pub const POSITION: &str = "pos";
}

/// Environment variable names
pub mod env_vars {
    /// Upstream API key (required)
    pub const API_KEY: &str = "NBA_API_KEY";

    /// Database URL, accepted for compatibility but unused
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// Listening port
    pub const PORT: &str = "PORT";

    /// Secret key
    pub const SECRET_KEY: &str = "SECRET_KEY";

    /// Override for the upstream base URL
    pub const API_BASE_URL: &str = "NBA_API_BASE_URL";

    /// Upstream timeout in seconds
    pub const HTTP_TIMEOUT: &str = "NBA_API_TIMEOUT";

    /// Upstream calls per second per operation
    pub const CALLS_PER_SECOND: &str = "NBA_API_CALLS_PER_SECOND";

    /// Season used when a request omits one
    pub const DEFAULT_SEASON: &str = "NBA_DEFAULT_SEASON";

    /// Log file path override
    pub const LOG_FILE: &str = "NBA_PROXY_LOG_FILE";
}

//! URL and query building for stats API endpoints

use crate::constants::{endpoints, upstream_params};

/// Query parameters sent with an upstream request, in order
pub type UpstreamQuery = Vec<(&'static str, String)>;

/// Builds the league player stats URL.
///
/// # Example
/// ```
/// use nba_stats_proxy::upstream::build_league_player_stats_url;
///
/// let url = build_league_player_stats_url("https://stats.nba.com/stats/");
/// assert_eq!(url, "https://stats.nba.com/stats/leaguedashplayerstats");
/// ```
pub fn build_league_player_stats_url(api_base_url: &str) -> String {
    format!(
        "{}/{}",
        api_base_url.trim_end_matches('/'),
        endpoints::LEAGUE_PLAYER_STATS
    )
}

/// Per-game regular season stats for a single player
pub fn player_stats_query(player_id: &str, season: &str) -> UpstreamQuery {
    vec![
        (upstream_params::PLAYER_ID, player_id.to_string()),
        (upstream_params::PER_MODE, upstream_params::PER_GAME.to_string()),
        (upstream_params::SEASON, season.to_string()),
        (
            upstream_params::SEASON_TYPE,
            upstream_params::REGULAR_SEASON.to_string(),
        ),
    ]
}

/// Regular season stats for every player in the league
pub fn league_players_query(season: &str) -> UpstreamQuery {
    vec![
        (
            upstream_params::PLAYER_ID,
            upstream_params::ALL_PLAYERS.to_string(),
        ),
        (upstream_params::SEASON, season.to_string()),
        (
            upstream_params::SEASON_TYPE,
            upstream_params::REGULAR_SEASON.to_string(),
        ),
    ]
}

//! Route handlers. Each one turns its outcome into a JSON reply; failures are
//! reported as `{"error": ...}` with the status from [`AppError::http_status`].

use percent_encoding::percent_decode_str;
use serde_json::json;
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

use super::AppState;
use crate::constants::{fields, operations};
use crate::error::AppError;
use crate::reshape::{Record, Reshaped};
use crate::upstream::models::PlayerSummary;
use crate::upstream::{league_players_query, player_stats_query};
use crate::validators::{QueryParams, validate_season_format};

pub const HEALTH_MESSAGE: &str = "NBA Stats API is running";

/// `GET /api/health`
pub async fn health() -> Result<Response, Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "message": HEALTH_MESSAGE
    }))
    .into_response())
}

/// `GET /api/nba/player/{player_id}/stats?season=YYYY-YY`
pub async fn get_player_stats(
    player_id: String,
    query: QueryParams,
    state: AppState,
) -> Result<Response, Rejection> {
    Ok(match player_stats(&player_id, &query, &state).await {
        Ok(reshaped) => warp::reply::json(&reshaped).into_response(),
        Err(e) => error_response(&e),
    })
}

/// `GET /api/nba/player/search?name=...&season=YYYY-YY`
///
/// Expects `name` to have been checked by the route's `require_params` filter.
pub async fn search_players(query: QueryParams, state: AppState) -> Result<Response, Rejection> {
    Ok(match find_players(&query, &state).await {
        Ok(players) => warp::reply::json(&players).into_response(),
        Err(e) => error_response(&e),
    })
}

async fn player_stats(
    player_id: &str,
    query: &QueryParams,
    state: &AppState,
) -> Result<Reshaped, AppError> {
    let player_id = decode_player_id(player_id)?;
    let season = resolve_season(query, &state.default_season)?;
    let upstream_query = player_stats_query(&player_id, season);

    state
        .limiter
        .throttle(
            operations::GET_PLAYER_STATS,
            state.stats.league_player_stats(&upstream_query),
        )
        .await
}

async fn find_players(query: &QueryParams, state: &AppState) -> Result<Vec<PlayerSummary>, AppError> {
    let name = query.get("name").map(String::as_str).unwrap_or_default();
    let season = resolve_season(query, &state.default_season)?;
    let upstream_query = league_players_query(season);

    let reshaped = state
        .limiter
        .throttle(
            operations::SEARCH_PLAYERS,
            state.stats.league_player_stats(&upstream_query),
        )
        .await?;

    Ok(filter_players(&reshaped, name))
}

/// Path segments arrive percent-encoded; the upstream query re-encodes them
fn decode_player_id(raw: &str) -> Result<String, AppError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|id| id.into_owned())
        .map_err(|_| AppError::validation("Invalid player ID"))
}

/// Season from the query string, or `default` when the parameter is absent.
/// A present but malformed (or empty) season is rejected.
fn resolve_season<'a>(query: &'a QueryParams, default: &'a str) -> Result<&'a str, AppError> {
    let season = query.get("season").map(String::as_str).unwrap_or(default);
    if validate_season_format(season) {
        Ok(season)
    } else {
        Err(AppError::invalid_season())
    }
}

/// League player records whose name contains `name`, ignoring case,
/// projected to summaries in their original order.
pub fn filter_players(reshaped: &Reshaped, name: &str) -> Vec<PlayerSummary> {
    let needle = name.to_lowercase();

    reshaped
        .records(fields::LEAGUE_DASH_PLAYER_STATS)
        .iter()
        .filter(|record| {
            record
                .get(fields::PLAYER_NAME)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
        .map(summarize)
        .collect()
}

fn summarize(record: &Record) -> PlayerSummary {
    let field = |key: &str| record.get(key).cloned().unwrap_or_default();
    PlayerSummary {
        id: field(fields::PLAYER_ID),
        name: field(fields::PLAYER_NAME),
        team: field(fields::TEAM_ABBREVIATION),
        position: field(fields::POSITION),
    }
}

/// JSON error reply for `error`, logged at a level matching its cause
pub fn error_response(error: &AppError) -> Response {
    if error.is_client_error() {
        warn!("Rejected request: {error}");
    } else if let Some(url) = error.upstream_url() {
        error!("Upstream call failed: {error} (URL: {url})");
    } else {
        error!("Request failed: {error}");
    }

    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_error(&error.to_string(), status)
}

/// `{"error": message}` with the given status
pub fn json_error(message: &str, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reshape::reshape;
    use crate::testing_utils::TestDataBuilder;
    use serde_json::{Value, json};

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_filter_players_case_insensitive_in_order() {
        let reshaped = reshape(TestDataBuilder::curry_league_payload()).unwrap();

        let players = filter_players(&reshaped, "cURRy");

        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0],
            PlayerSummary {
                id: json!(201939),
                name: json!("Stephen Curry"),
                team: json!("GSW"),
                position: json!("G"),
            }
        );
        assert_eq!(players[1].name, json!("Seth Curry"));
        assert_eq!(players[1].team, json!("BKN"));
    }

    #[test]
    fn test_filter_players_no_match() {
        let reshaped = reshape(TestDataBuilder::curry_league_payload()).unwrap();
        assert!(filter_players(&reshaped, "jordan").is_empty());
    }

    #[test]
    fn test_filter_players_passthrough_payload_is_empty() {
        let reshaped = Reshaped::Passthrough(json!({"message": "no data"}));
        assert!(filter_players(&reshaped, "curry").is_empty());
    }

    #[test]
    fn test_filter_players_missing_fields_become_null() {
        let payload = TestDataBuilder::payload(&[TestDataBuilder::result_set(
            "LeagueDashPlayerStats",
            &["PLAYER_ID", "PLAYER_NAME"],
            vec![vec![json!(7), json!("Test Curry")], vec![json!(8), Value::Null]],
        )]);
        let reshaped = reshape(payload).unwrap();

        let players = filter_players(&reshaped, "curry");

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, json!(7));
        assert_eq!(players[0].team, Value::Null);
        assert_eq!(players[0].position, Value::Null);
    }

    #[test]
    fn test_decode_player_id() {
        assert_eq!(decode_player_id("201939").unwrap(), "201939");
        assert_eq!(decode_player_id("20%2019").unwrap(), "20 19");
        assert_eq!(decode_player_id("a%2Fb").unwrap(), "a/b");
    }

    #[test]
    fn test_decode_player_id_rejects_invalid_utf8() {
        let error = decode_player_id("%FF%FE").unwrap_err();
        assert_eq!(error.http_status(), 400);
        assert_eq!(error.to_string(), "Invalid player ID");
    }

    #[test]
    fn test_resolve_season_default_and_explicit() {
        assert_eq!(resolve_season(&query(&[]), "2023-24").unwrap(), "2023-24");
        assert_eq!(
            resolve_season(&query(&[("season", "2019-20")]), "2023-24").unwrap(),
            "2019-20"
        );
    }

    #[test]
    fn test_resolve_season_rejects_invalid_and_empty() {
        let error = resolve_season(&query(&[("season", "invalid")]), "2023-24").unwrap_err();
        assert_eq!(error.http_status(), 400);

        assert!(resolve_season(&query(&[("season", "")]), "2023-24").is_err());
    }

    #[tokio::test]
    async fn test_error_response_status_and_body() {
        let response = error_response(&AppError::upstream_status(404, "http://example.com"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = warp::hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "NBA API returned status code: 404"}));
    }

    #[tokio::test]
    async fn test_health_reply() {
        let response = health().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = warp::hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], HEALTH_MESSAGE);
    }
}

//! Request validation: season strings and required query parameters

use std::collections::HashMap;

use tracing::debug;
use warp::{Filter, Rejection};

use crate::constants::MIN_SEASON_START_YEAR_EXCLUSIVE;
use crate::error::AppError;

/// Query parameters of an incoming request. A repeated name keeps its first value.
pub type QueryParams = HashMap<String, String>;

/// Filter extracting the query string as [`QueryParams`]
pub fn query_params() -> impl Filter<Extract = (QueryParams,), Error = Rejection> + Clone {
    warp::query::<Vec<(String, String)>>().map(first_values)
}

fn first_values(pairs: Vec<(String, String)>) -> QueryParams {
    let mut query = QueryParams::new();
    for (name, value) in pairs {
        query.entry(name).or_insert(value);
    }
    query
}

/// Checks that a season string has the `YYYY-YY` form, e.g. `2023-24`.
///
/// The string must split on `-` into exactly two segments. The first must parse
/// as a year later than 1946 and the second must be exactly two digits.
/// Anything else returns `false`.
///
/// # Example
/// ```
/// use nba_stats_proxy::validators::validate_season_format;
///
/// assert!(validate_season_format("2023-24"));
/// assert!(!validate_season_format("1946-47"));
/// assert!(!validate_season_format("2023-2024"));
/// ```
pub fn validate_season_format(season: &str) -> bool {
    let mut parts = season.split('-');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    let Ok(start_year) = start.parse::<i32>() else {
        return false;
    };

    start_year > MIN_SEASON_START_YEAR_EXCLUSIVE
        && end.len() == 2
        && end.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the names from `required` that are absent or empty in `query`,
/// in the order they were given.
pub fn missing_params<'a>(query: &QueryParams, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|name| query.get(*name).is_none_or(|value| value.is_empty()))
        .collect()
}

/// Filter that rejects the request with [`AppError::MissingParams`] unless every
/// name in `required` is present and non-empty in the query string.
///
/// On success the parsed query parameters are passed on to the wrapped handler.
pub fn require_params(
    required: &'static [&'static str],
) -> impl Filter<Extract = (QueryParams,), Error = Rejection> + Clone {
    query_params().and_then(move |query: QueryParams| async move {
        let missing = missing_params(&query, required);
        if missing.is_empty() {
            Ok(query)
        } else {
            debug!("Rejecting request, missing parameters: {:?}", missing);
            Err(warp::reject::custom(AppError::missing_params(missing)))
        }
    })
}

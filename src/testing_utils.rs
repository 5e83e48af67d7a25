use serde_json::{Value, json};

use crate::config::Config;
use crate::upstream::models::ResultSet;

/// Test utilities for creating mock upstream payloads and configurations
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a result set from headers and rows
    pub fn result_set(name: &str, headers: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
        ResultSet {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            row_set: rows,
        }
    }

    /// Wraps result sets the way the stats API does
    pub fn payload(result_sets: &[ResultSet]) -> Value {
        json!({ "resultSets": result_sets })
    }

    /// Single-player stats payload with one row
    pub fn player_stats_payload() -> Value {
        Self::payload(&[Self::result_set(
            "PlayerStats",
            &["PLAYER_ID", "PLAYER_NAME", "PTS"],
            vec![vec![json!(1), json!("Test Player"), json!(25.5)]],
        )])
    }

    /// Creates a league player row for the search endpoint
    pub fn league_player_row(id: i64, name: &str, team: &str, position: &str) -> Vec<Value> {
        vec![json!(id), json!(name), json!(team), json!(position)]
    }

    /// League payload with an arbitrary list of players
    pub fn league_payload(rows: Vec<Vec<Value>>) -> Value {
        Self::payload(&[Self::result_set(
            "LeagueDashPlayerStats",
            &["PLAYER_ID", "PLAYER_NAME", "TEAM_ABBREVIATION", "POS"],
            rows,
        )])
    }

    /// League payload with two Currys and one other player
    pub fn curry_league_payload() -> Value {
        Self::league_payload(vec![
            Self::league_player_row(201939, "Stephen Curry", "GSW", "G"),
            Self::league_player_row(2544, "LeBron James", "LAL", "F"),
            Self::league_player_row(203552, "Seth Curry", "BKN", "G"),
        ])
    }

    /// Config pointing at a mock upstream, throttling effectively disabled
    pub fn config(api_base_url: &str) -> Config {
        Config {
            api_key: "test-key".to_string(),
            api_base_url: api_base_url.to_string(),
            calls_per_second: 1000.0,
            ..Config::default()
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tabular unit returned by the stats API: a name, column headers and rows.
///
/// Every row is expected to have exactly one value per header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

/// `{id, name, team, position}` projection of a league player record.
/// Fields missing from the record serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: Value,
    pub name: Value,
    pub team: Value,
    pub position: Value,
}

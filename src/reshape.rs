//! Flattens the stats API's columnar result sets into named lists of records.
//!
//! The upstream payload looks like
//! `{"resultSets": [{"name": "PlayerStats", "headers": [...], "rowSet": [[...], ...]}]}`.
//! Reshaping turns it into `{"playerstats": [{"player_id": 1, ...}, ...]}`:
//! result-set names and headers are lower-cased and each row is zipped against
//! the headers. Values are carried over untouched.
//!
//! A payload without result sets (key absent, `null`, `false`, `0`, or an empty
//! string/array/object) is passed through unchanged. A `resultSets` value that is
//! present but malformed, or a row whose width differs from its headers, is a
//! [`AppError::Format`] error rather than a silent truncation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::upstream::models::ResultSet;

/// One row keyed by lower-cased header name
pub type Record = Map<String, Value>;

/// Lower-cased result-set name mapped to its records, in row order
pub type ReshapedPayload = BTreeMap<String, Vec<Record>>;

const RESULT_SETS_KEY: &str = "resultSets";

/// Output of [`reshape`]: either reshaped records or the original payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reshaped {
    Records(ReshapedPayload),
    Passthrough(Value),
}

impl Reshaped {
    /// Records of the named result set (lower-case name), empty if absent
    /// or if the payload was passed through.
    pub fn records(&self, name: &str) -> &[Record] {
        match self {
            Reshaped::Records(payload) => payload.get(name).map(Vec::as_slice).unwrap_or(&[]),
            Reshaped::Passthrough(_) => &[],
        }
    }
}

/// Reshapes a raw upstream payload.
pub fn reshape(payload: Value) -> Result<Reshaped, AppError> {
    let has_result_sets = payload
        .get(RESULT_SETS_KEY)
        .is_some_and(|value| !is_falsy(value));
    if !has_result_sets {
        return Ok(Reshaped::Passthrough(payload));
    }

    let result_sets = Vec::<ResultSet>::deserialize(&payload[RESULT_SETS_KEY])
        .map_err(|e| AppError::format_error(format!("malformed resultSets: {e}")))?;
    reshape_result_sets(&result_sets).map(Reshaped::Records)
}

/// Reshapes already-parsed result sets.
///
/// A later result set whose lower-cased name matches an earlier one replaces it.
pub fn reshape_result_sets(result_sets: &[ResultSet]) -> Result<ReshapedPayload, AppError> {
    let mut reshaped = ReshapedPayload::new();

    for result_set in result_sets {
        let headers: Vec<String> = result_set.headers.iter().map(|h| h.to_lowercase()).collect();

        let records = result_set
            .row_set
            .iter()
            .enumerate()
            .map(|(index, row)| {
                if row.len() != headers.len() {
                    return Err(AppError::format_error(format!(
                        "result set '{}' row {} has {} values but {} headers",
                        result_set.name,
                        index,
                        row.len(),
                        headers.len()
                    )));
                }
                Ok(headers.iter().cloned().zip(row.iter().cloned()).collect())
            })
            .collect::<Result<Vec<Record>, AppError>>()?;

        reshaped.insert(result_set.name.to_lowercase(), records);
    }

    Ok(reshaped)
}

/// Values that count as "no result sets"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de;
use crate::status::QueryStatus;

/// Full set of monitored queries keyed by uid, as returned by the
/// dashboard endpoints. Each tick replaces the previous mapping wholesale.
pub type DashboardSnapshot = BTreeMap<String, QuerySnapshot>;

/// A field the client only ever displays.
///
/// The backend formats schedule fields (`interval`, `eta`, `last_run`) in
/// whatever shape its store holds, so they are kept as raw JSON and only
/// rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayValue(pub serde_json::Value);

impl DisplayValue {
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::Null => Ok(()),
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue(serde_json::Value::String(value.to_string()))
    }
}

/// One monitored query as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySnapshot {
    #[serde(default, deserialize_with = "de::uid")]
    pub uid: String,
    #[serde(default, deserialize_with = "de::text")]
    pub alias: String,
    #[serde(default, deserialize_with = "de::text")]
    pub url: String,
    #[serde(default, deserialize_with = "de::text")]
    pub target_url: String,
    /// Last server-side evaluation matched.
    #[serde(default, deserialize_with = "de::flag")]
    pub found: bool,
    /// True only on the scan where the server actually ran this query.
    #[serde(default, deserialize_with = "de::flag")]
    pub is_new: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_recurring: bool,
    #[serde(default)]
    pub status: QueryStatus,
    #[serde(default, alias = "local_sound", deserialize_with = "de::text")]
    pub alert_sound: String,
    #[serde(default, deserialize_with = "de::opt_int")]
    pub cycles: Option<i64>,
    /// Negative values disable the query on the board.
    #[serde(default, deserialize_with = "de::opt_int")]
    pub cycles_limit: Option<i64>,
    #[serde(default)]
    pub interval: DisplayValue,
    #[serde(default)]
    pub cooldown: DisplayValue,
    #[serde(default)]
    pub eta: DisplayValue,
    #[serde(default)]
    pub last_run: DisplayValue,
    #[serde(default)]
    pub last_match_datetime: DisplayValue,
    #[serde(default, deserialize_with = "de::text")]
    pub sequence: String,
    #[serde(default, deserialize_with = "de::text")]
    pub mode: String,
    #[serde(default)]
    pub randomize: DisplayValue,
    #[serde(default, deserialize_with = "de::opt_int")]
    pub min_matches: Option<i64>,
    #[serde(default, deserialize_with = "de::text")]
    pub cookies_filename: String,
    #[serde(default, deserialize_with = "de::text")]
    pub message: String,
}

impl QuerySnapshot {
    /// Queries with a negative cycle limit are parked: not shown and never
    /// alerted on.
    pub fn is_disabled(&self) -> bool {
        self.cycles_limit.is_some_and(|limit| limit < 0)
    }

    /// The page a user should open for this query.
    pub fn target_url(&self) -> &str {
        if self.target_url.is_empty() {
            &self.url
        } else {
            &self.target_url
        }
    }

    /// Alias if set, otherwise the url.
    pub fn display_name(&self) -> &str {
        if self.alias.is_empty() {
            &self.url
        } else {
            &self.alias
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of the most recent server-side run of a query.
///
/// The wire format is a bare integer. Codes the client does not know keep
/// their raw value so they serialize back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    NotYetRan,
    Ok,
    AccessDenied,
    ConnectionLost,
    Unknown(i64),
}

impl QueryStatus {
    pub fn code(&self) -> i64 {
        match self {
            QueryStatus::NotYetRan => -1,
            QueryStatus::Ok => 0,
            QueryStatus::AccessDenied => 1,
            QueryStatus::ConnectionLost => 2,
            QueryStatus::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryStatus::NotYetRan => "Not Yet Ran",
            QueryStatus::Ok => "OK",
            QueryStatus::AccessDenied => "Access Denied",
            QueryStatus::ConnectionLost => "Connection Lost",
            QueryStatus::Unknown(_) => "Unknown",
        }
    }

    /// Whether the last run reached the target page and read it.
    pub fn is_healthy(&self) -> bool {
        matches!(self, QueryStatus::Ok)
    }
}

impl From<i64> for QueryStatus {
    fn from(code: i64) -> Self {
        match code {
            -1 => QueryStatus::NotYetRan,
            0 => QueryStatus::Ok,
            1 => QueryStatus::AccessDenied,
            2 => QueryStatus::ConnectionLost,
            other => QueryStatus::Unknown(other),
        }
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Human label for a raw status code. Total over `i64`.
pub fn status_label(code: i64) -> &'static str {
    QueryStatus::from(code).label()
}

impl Serialize for QueryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for QueryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(QueryStatus::NotYetRan);
        }
        crate::de::int_from_value(&value)
            .map(QueryStatus::from)
            .ok_or_else(|| {
                serde::de::Error::custom(format!("expected a status code, got {value}"))
            })
    }
}

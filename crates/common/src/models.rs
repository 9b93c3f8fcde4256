//! Wire data model for the exploration service.
//!
//! Request casing follows the service's API (`ApiKey`, `DataSourceName`, ...);
//! response bodies are lowercase (`id`, `status`, `metrics`, `description`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(dataset, table, column)` triple identifying one explorable target.
///
/// Used as the response cache key; immutable once an Explorer is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnIdentity {
    pub dataset: String,
    pub table: String,
    pub column: String,
}

impl ColumnIdentity {
    pub fn new(
        dataset: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.dataset, self.table, self.column)
    }
}

/// Body of `POST /explore`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchRequest {
    pub api_key: String,
    pub data_source_name: String,
    pub table_name: String,
    pub column_name: String,
}

/// Body returned by `POST /explore`.
///
/// A missing `id` means the service rejected the launch; the remaining
/// fields are kept verbatim so the rejection can be reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Exploration lifecycle status reported by `GET /result/<id>`.
///
/// `Complete` and `Error` are terminal; everything else keeps the poll loop
/// running. Unknown intermediate states are preserved as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QueryStatus {
    New,
    Processing,
    Complete,
    Error,
    Other(String),
}

impl QueryStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryStatus::Complete | QueryStatus::Error)
    }
}

impl From<String> for QueryStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "New" => QueryStatus::New,
            "Processing" => QueryStatus::Processing,
            "Complete" => QueryStatus::Complete,
            "Error" => QueryStatus::Error,
            _ => QueryStatus::Other(s),
        }
    }
}

impl From<QueryStatus> for String {
    fn from(status: QueryStatus) -> String {
        status.to_string()
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::New => write!(f, "New"),
            QueryStatus::Processing => write!(f, "Processing"),
            QueryStatus::Complete => write!(f, "Complete"),
            QueryStatus::Error => write!(f, "Error"),
            QueryStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A named measurement produced by a completed exploration.
///
/// Value shape varies by metric name: bare scalars (`naive_min`), record
/// arrays (`histogram.buckets`, `distinct.values`) or nested count
/// structures (`dates_linear.*`, `dates_cyclical.*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: serde_json::Value,
}

/// Full payload of `GET /result/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub status: QueryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_launch_request_wire_casing() {
        let request = LaunchRequest {
            api_key: "key".to_string(),
            data_source_name: "gda_banking".to_string(),
            table_name: "loans".to_string(),
            column_name: "amount".to_string(),
        };

        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["ApiKey"], "key");
        assert_eq!(v["DataSourceName"], "gda_banking");
        assert_eq!(v["TableName"], "loans");
        assert_eq!(v["ColumnName"], "amount");
    }

    #[test]
    fn test_query_status_parsing() {
        let result: QueryResult = serde_json::from_value(json!({
            "status": "Processing",
            "metrics": []
        }))
        .unwrap();
        assert_eq!(result.status, QueryStatus::Processing);
        assert!(!result.status.is_terminal());

        let result: QueryResult = serde_json::from_value(json!({
            "status": "Running"
        }))
        .unwrap();
        assert_eq!(result.status, QueryStatus::Other("Running".to_string()));
        assert!(!result.status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(QueryStatus::Complete.is_terminal());
        assert!(QueryStatus::Error.is_terminal());
        assert!(!QueryStatus::New.is_terminal());
    }

    #[test]
    fn test_query_result_preserves_extra_fields() {
        let result: QueryResult = serde_json::from_value(json!({
            "id": "8e4c3b8e-0001-4a43-a1b0-0b3c8d2a9f10",
            "status": "Complete",
            "metrics": [{ "name": "naive_min", "value": 3 }]
        }))
        .unwrap();

        assert_eq!(result.metrics.len(), 1);
        assert_eq!(
            result.extra.get("id").and_then(|v| v.as_str()),
            Some("8e4c3b8e-0001-4a43-a1b0-0b3c8d2a9f10")
        );

        // Round-trips for cache dumping
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["status"], "Complete");
        assert_eq!(v["metrics"][0]["name"], "naive_min");
    }

    #[test]
    fn test_launch_response_missing_id() {
        let response: LaunchResponse =
            serde_json::from_value(json!({ "description": "Could not find column 'amount'." }))
                .unwrap();
        assert!(response.id.is_none());
        assert!(response.extra.contains_key("description"));
    }
}

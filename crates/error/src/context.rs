//! # Error Contexts
//!
//! Structured metadata for errors to enable programmatic analysis.

use serde::{Deserialize, Serialize};

/// Structured context for machine-parseable errors.
///
/// Each variant provides specific fields relevant to that error type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorContext {
    /// Context for transport errors (SCRY-1001, 1002, 1003)
    Http {
        url: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// Context for SCRY-2001/2002 (query rejected or failed)
    QueryFailure {
        dataset: String,
        table: String,
        column: String,
        description: Option<String>,
    },

    /// Context for SCRY-2003 (PollDeadlineExceeded)
    PollBudget {
        polls: u32,
        max_polls: Option<u32>,
        deadline_secs: Option<u64>,
    },

    /// Context for SCRY-2004 (MetricNotFound)
    MetricNotFound {
        metric: String,
        available_metrics: Vec<String>,
    },

    /// Context for SCRY-2005 (UnknownTimeComponent)
    TimeComponent {
        component: String,
        recognized: Vec<String>,
    },

    /// Context for SCRY-3001/3002/3003 (config errors)
    Config {
        file_path: Option<String>,
        field: Option<String>,
    },

    /// Generic key-value context for extensibility
    Generic {
        #[serde(flatten)]
        data: std::collections::HashMap<String, serde_json::Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_failure_context_serde_roundtrip() {
        let ctx = ErrorContext::QueryFailure {
            dataset: "gda_banking".to_string(),
            table: "loans".to_string(),
            column: "amount".to_string(),
            description: Some("column type unsupported".to_string()),
        };

        let json = serde_json::to_string(&ctx).unwrap();
        let de: ErrorContext = serde_json::from_str(&json).unwrap();

        match de {
            ErrorContext::QueryFailure { dataset, .. } => {
                assert_eq!(dataset, "gda_banking");
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_http_context_tagging() {
        let ctx = ErrorContext::Http {
            url: "http://localhost:5000/explore".to_string(),
            status: Some(500),
            body: None,
        };

        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"type\":\"http\""));
        assert!(json.contains("\"status\":500"));
    }
}

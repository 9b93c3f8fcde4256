use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error codes following SCRY-XXXX format.
///
/// ## Code Ranges
/// - **1000-1999**: Transport errors
/// - **2000-2999**: Query errors
/// - **3000-3999**: Configuration errors
/// - **4000-4999**: Authentication errors
/// - **5000-5999**: Internal/System errors
///
/// Codes are stable across versions (semver contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[non_exhaustive]
pub enum ErrorCode {
    // === Transport Errors (1000-1999) ===
    /// SCRY-1001: HTTP request returned a non-success status
    RequestFailed = 1001,
    /// SCRY-1002: Network connection timeout
    ConnectionTimeout = 1002,
    /// SCRY-1003: Exploration service unreachable
    ServiceUnreachable = 1003,

    // === Query Errors (2000-2999) ===
    /// SCRY-2001: Launch response carried no exploration id
    QueryRejected = 2001,
    /// SCRY-2002: Exploration reached terminal Error status
    QueryFailed = 2002,
    /// SCRY-2003: Poll bound or deadline exceeded before a terminal status
    PollDeadlineExceeded = 2003,
    /// SCRY-2004: Metric name not present in the result
    MetricNotFound = 2004,
    /// SCRY-2005: Time component outside the recognized cycle table
    UnknownTimeComponent = 2005,

    // === Configuration Errors (3000-3999) ===
    /// SCRY-3001: Configuration failed to load or validate
    InvalidConfig = 3001,
    /// SCRY-3002: Missing required field in config
    MissingRequiredField = 3002,
    /// SCRY-3003: Service base URL failed to parse
    InvalidUrl = 3003,

    // === Auth Errors (4000-4999) ===
    /// SCRY-4001: API key invalid or rejected by the service
    InvalidApiKey = 4001,

    // === Internal Errors (5000-5999) ===
    /// SCRY-5001: Serialization/deserialization failed
    SerializationFailed = 5001,
    /// SCRY-5002: Chart rendering failed
    ChartRenderFailed = 5002,
    /// SCRY-5003: Unexpected internal state
    Internal = 5003,

    /// SCRY-9999: Unknown/unclassified error
    Unknown = 9999,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the formatted code string (e.g., "SCRY-2002")
    pub fn as_str(&self) -> String {
        format!("SCRY-{:04}", self.as_u16())
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self.as_u16() {
            1000..=1999 => ErrorCategory::Transport,
            2000..=2999 => ErrorCategory::Query,
            3000..=3999 => ErrorCategory::Config,
            4000..=4999 => ErrorCategory::Auth,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> String {
        code.as_str()
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        // Parse "SCRY-XXXX" format
        let num: u16 = s
            .strip_prefix("SCRY-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| "Invalid format".to_string())?;
        Self::try_from(num).map_err(|_| "Unknown code".to_string())
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(n: u16) -> std::result::Result<Self, Self::Error> {
        match n {
            1001 => Ok(Self::RequestFailed),
            1002 => Ok(Self::ConnectionTimeout),
            1003 => Ok(Self::ServiceUnreachable),
            2001 => Ok(Self::QueryRejected),
            2002 => Ok(Self::QueryFailed),
            2003 => Ok(Self::PollDeadlineExceeded),
            2004 => Ok(Self::MetricNotFound),
            2005 => Ok(Self::UnknownTimeComponent),
            3001 => Ok(Self::InvalidConfig),
            3002 => Ok(Self::MissingRequiredField),
            3003 => Ok(Self::InvalidUrl),
            4001 => Ok(Self::InvalidApiKey),
            5001 => Ok(Self::SerializationFailed),
            5002 => Ok(Self::ChartRenderFailed),
            5003 => Ok(Self::Internal),
            9999 => Ok(Self::Unknown),
            _ => Err(format!("Unknown error code: {}", n)),
        }
    }
}

/// High-level error category for exit-code mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCategory {
    Transport,
    Query,
    Config,
    Auth,
    Internal,
}

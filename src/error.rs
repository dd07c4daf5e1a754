//! Error types for fetching and aggregating channel resources.

use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve one JSON resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Transport failure or a body that is not usable JSON.
    #[error("resource fetch failed: {cause}")]
    Resource { cause: String },

    /// No response within the configured budget.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl FetchError {
    pub fn resource(cause: impl Into<String>) -> Self {
        FetchError::Resource {
            cause: cause.into(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::resource(format!("invalid JSON: {}", err))
    }
}

/// One channel could not be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to aggregate channel '{id}': {cause}")]
pub struct AggregationError {
    pub id: String,
    #[source]
    pub cause: FetchError,
}

/// The batch was cancelled before every channel settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel batch was cancelled")]
pub struct Cancelled;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::HttpStatus { status: 502 }.to_string(),
            "upstream returned HTTP 502"
        );
        assert_eq!(
            FetchError::Timeout(Duration::from_millis(1500)).to_string(),
            "request timed out after 1.5s"
        );

        let err = AggregationError {
            id: "storbeck".to_string(),
            cause: FetchError::resource("connection refused"),
        };
        assert_eq!(
            err.to_string(),
            "failed to aggregate channel 'storbeck': resource fetch failed: connection refused"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        match FetchError::from(parse_err) {
            FetchError::Resource { cause } => assert!(cause.starts_with("invalid JSON")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

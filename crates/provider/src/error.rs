use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while a metrics provider performs a lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested resource (region, namespace, instance...) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing API rejected or failed the request.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The provider did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider was given invalid configuration or credentials.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The backing API throttled the request.
    #[error("rate limited")]
    RateLimited,

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ProviderError {
    /// Returns `true` if the error is transient and the lookup may succeed
    /// on a later refresh.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited
        )
    }

    /// Classify a raw API error message into the matching variant.
    ///
    /// Inspects the message for throttling, timeout and connection patterns;
    /// anything else becomes [`ProviderError::ExecutionFailed`].
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many")
        {
            Self::RateLimited
        } else if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout(Duration::from_secs(30))
        } else if lower.contains("connection")
            || lower.contains("connect")
            || lower.contains("dns")
            || lower.contains("network")
        {
            Self::Connection(message.to_owned())
        } else if lower.contains("credential")
            || lower.contains("accessdenied")
            || lower.contains("unauthorized")
        {
            Self::Configuration(message.to_owned())
        } else {
            Self::ExecutionFailed(message.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(ProviderError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(ProviderError::Connection("reset".into()).is_retryable());
        assert!(ProviderError::RateLimited.is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!ProviderError::NotFound("x".into()).is_retryable());
        assert!(!ProviderError::ExecutionFailed("x".into()).is_retryable());
        assert!(!ProviderError::Configuration("x".into()).is_retryable());
        assert!(!ProviderError::Serialization("x".into()).is_retryable());
    }

    #[test]
    fn classify_throttled() {
        let err = ProviderError::classify("Throttling: Rate exceeded");
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[test]
    fn classify_timeout() {
        let err = ProviderError::classify("Request timed out after 30s");
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[test]
    fn classify_connection() {
        let err = ProviderError::classify("Connection refused: monitoring.us-east-1.amazonaws.com");
        assert!(matches!(err, ProviderError::Connection(_)));
    }

    #[test]
    fn classify_credentials() {
        let err = ProviderError::classify("AccessDenied: not authorized to call ListMetrics");
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn classify_generic_service_error() {
        let err = ProviderError::classify("InvalidParameterValue: bad namespace");
        assert!(matches!(err, ProviderError::ExecutionFailed(_)));
    }

    #[test]
    fn error_display() {
        let err = ProviderError::NotFound("region eu-north-9".into());
        assert_eq!(err.to_string(), "not found: region eu-north-9");

        let err = ProviderError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "timeout after 500ms");

        assert_eq!(ProviderError::RateLimited.to_string(), "rate limited");
    }
}

use metricvar_core::FilterParseError;
use metricvar_provider::ProviderError;
use thiserror::Error;

/// Why a variable query produced no options.
///
/// [`VariableQueryResolver::resolve`](crate::VariableQueryResolver::resolve)
/// logs these and returns an empty list; [`try_resolve`] hands them back.
///
/// [`try_resolve`]: crate::VariableQueryResolver::try_resolve
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A field the lookup needs was absent or empty. The provider was not
    /// called.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The serialized `ec2Filters` or `tags` expression could not be parsed.
    #[error(transparent)]
    InvalidFilter(#[from] FilterParseError),

    /// The provider lookup failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ResolveError {
    /// Returns `true` if a later refresh of the same query may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_retryable(),
            Self::MissingField(_) | Self::InvalidFilter(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ResolveError::MissingField("instanceID").to_string(),
            "missing required field: instanceID"
        );
        assert_eq!(
            ResolveError::from(ProviderError::RateLimited).to_string(),
            "provider error: rate limited"
        );
    }

    #[test]
    fn only_transient_provider_errors_are_retryable() {
        assert!(ResolveError::from(ProviderError::Timeout(Duration::from_secs(1))).is_retryable());
        assert!(!ResolveError::from(ProviderError::NotFound("x".into())).is_retryable());
        assert!(!ResolveError::MissingField("attributeName").is_retryable());

        let parse = metricvar_core::FilterSet::parse("tags", Some("{invalid")).unwrap_err();
        assert!(!ResolveError::from(parse).is_retryable());
    }
}

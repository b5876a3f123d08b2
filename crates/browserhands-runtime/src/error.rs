//! Session lifecycle errors.

use thiserror::Error;

use browserhands_protocols::{EngineError, Provider, UnsupportedProvider};

/// Errors returned synchronously by the lifecycle manager and registry.
///
/// Failures that happen while a task runs never appear here; they are
/// recorded on the session instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    UnsupportedProvider(#[from] UnsupportedProvider),

    #[error("{var} not configured")]
    MissingCredential {
        provider: Provider,
        var: &'static str,
    },

    #[error("Maximum concurrent sessions ({max}) reached")]
    CapacityExceeded { max: usize },

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    Duplicate(String),

    #[error("Failed to start task: {0}")]
    EngineConstruction(#[source] EngineError),
}

impl SessionError {
    pub fn missing_credential(provider: Provider) -> Self {
        Self::MissingCredential {
            provider,
            var: provider.credential_var(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_variable() {
        let err = SessionError::missing_credential(Provider::Anthropic);
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY not configured");
    }

    #[test]
    fn test_capacity_message() {
        let err = SessionError::CapacityExceeded { max: 3 };
        assert_eq!(err.to_string(), "Maximum concurrent sessions (3) reached");
    }

    #[test]
    fn test_unsupported_provider_from() {
        let err: SessionError = UnsupportedProvider("bard".to_string()).into();
        assert_eq!(err.to_string(), "Unsupported LLM provider: bard");
    }

    #[test]
    fn test_engine_construction_keeps_source() {
        let err = SessionError::EngineConstruction(EngineError::construction("no runner"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("no runner"));
    }
}

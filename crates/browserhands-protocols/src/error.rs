//! Engine error types.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by an automation engine or its factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine could not be built for the task.
    #[error("Engine construction failed: {0}")]
    Construction(String),

    /// The engine ran and failed.
    #[error("{0}")]
    Execution(String),

    /// The run exceeded its time budget.
    #[error("Task timed out after {0:?}")]
    Timeout(Duration),

    /// The execution unit died without reporting an outcome.
    #[error("Engine crashed: {0}")]
    Crashed(String),

    /// Teardown of the engine failed.
    #[error("Engine teardown failed: {0}")]
    Teardown(String),
}

impl EngineError {
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_message_is_bare() {
        let err = EngineError::execution("page failed to load");
        assert_eq!(err.to_string(), "page failed to load");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            EngineError::Timeout(Duration::from_secs(300)).to_string(),
            "Task timed out after 300s"
        );
        assert_eq!(
            EngineError::Timeout(Duration::from_millis(250)).to_string(),
            "Task timed out after 250ms"
        );
    }

    #[test]
    fn test_construction_display() {
        let err = EngineError::construction("runner missing");
        assert!(err.to_string().contains("construction"));
        assert!(err.to_string().contains("runner missing"));
    }
}

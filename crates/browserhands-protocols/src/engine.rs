//! Automation engine protocol.
//!
//! The engine is the delegated capability that actually drives a browser
//! and an LLM. The runtime only starts it, waits for its outcome, and tears
//! it down.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::EngineError;
use crate::task::TaskSpec;

/// Result of a successful engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutcome {
    /// The agent's final answer, if it produced one.
    pub final_result: Option<String>,
}

impl EngineOutcome {
    pub fn with_result(result: impl Into<String>) -> Self {
        Self {
            final_result: Some(result.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Callback through which an engine reports the step it is on.
#[derive(Clone)]
pub struct StepProgress {
    report: Arc<dyn Fn(u32) + Send + Sync>,
}

impl StepProgress {
    pub fn new(report: impl Fn(u32) + Send + Sync + 'static) -> Self {
        Self {
            report: Arc::new(report),
        }
    }

    /// A sink that discards progress.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, step: u32) {
        (self.report)(step);
    }
}

impl fmt::Debug for StepProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepProgress").finish_non_exhaustive()
    }
}

/// One delegated automation run, bound to a single task.
#[async_trait]
pub trait AutomationEngine: Send + Sync {
    /// Run the task for at most `step_limit` steps.
    async fn execute(
        &self,
        step_limit: u32,
        progress: StepProgress,
    ) -> Result<EngineOutcome, EngineError>;

    /// Release browser resources and stop any in-flight run.
    ///
    /// Callers treat this as best-effort.
    async fn teardown(&self) -> Result<(), EngineError>;
}

/// Builds engines for admitted tasks.
pub trait EngineFactory: Send + Sync {
    fn build(
        &self,
        spec: &TaskSpec,
        credential: Credential,
    ) -> Result<Arc<dyn AutomationEngine>, EngineError>;
}

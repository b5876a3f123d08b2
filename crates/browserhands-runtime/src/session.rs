//! Session records.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use browserhands_protocols::AutomationEngine;

/// Session state. `Completed` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Running,
    Completed,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of a session, safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub status: SessionStatus,
    pub current_step: u32,
    pub max_steps: u32,
    pub final_result: Option<String>,
    pub error: Option<String>,
}

/// A tracked session together with the engine it owns.
pub struct SessionRecord {
    id: String,
    status: SessionStatus,
    current_step: u32,
    max_steps: u32,
    final_result: Option<String>,
    error: Option<String>,
    engine: Arc<dyn AutomationEngine>,
}

impl SessionRecord {
    /// A freshly admitted session.
    pub fn new(id: impl Into<String>, max_steps: u32, engine: Arc<dyn AutomationEngine>) -> Self {
        Self {
            id: id.into(),
            status: SessionStatus::Running,
            current_step: 0,
            max_steps,
            final_result: None,
            error: None,
            engine,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn engine(&self) -> Arc<dyn AutomationEngine> {
        self.engine.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            status: self.status,
            current_step: self.current_step,
            max_steps: self.max_steps,
            final_result: self.final_result.clone(),
            error: self.error.clone(),
        }
    }

    /// Record engine progress. Ignored once terminal; never moves backwards.
    pub fn record_step(&mut self, step: u32) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let step = step.min(self.max_steps);
        if step > self.current_step {
            self.current_step = step;
        }
        true
    }

    /// Transition to `Completed`. Returns false if already terminal.
    pub fn complete(&mut self, final_result: Option<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = SessionStatus::Completed;
        self.current_step = self.max_steps;
        self.final_result = final_result;
        true
    }

    /// Transition to `Error`. Returns false if already terminal.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = SessionStatus::Error;
        self.error = Some(error.into());
        true
    }
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("current_step", &self.current_step)
            .field("max_steps", &self.max_steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use browserhands_protocols::{EngineError, EngineOutcome, StepProgress};

    struct IdleEngine;

    #[async_trait]
    impl AutomationEngine for IdleEngine {
        async fn execute(&self, _: u32, _: StepProgress) -> Result<EngineOutcome, EngineError> {
            Ok(EngineOutcome::empty())
        }

        async fn teardown(&self) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn record(max_steps: u32) -> SessionRecord {
        SessionRecord::new("s-1", max_steps, Arc::new(IdleEngine))
    }

    #[test]
    fn test_new_session_is_running() {
        let snap = record(10).snapshot();
        assert_eq!(snap.status, SessionStatus::Running);
        assert_eq!(snap.current_step, 0);
        assert_eq!(snap.max_steps, 10);
        assert!(snap.final_result.is_none());
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_complete_sets_result_and_steps() {
        let mut rec = record(5);
        assert!(rec.complete(Some("42".to_string())));
        let snap = rec.snapshot();
        assert_eq!(snap.status, SessionStatus::Completed);
        assert_eq!(snap.current_step, 5);
        assert_eq!(snap.final_result.as_deref(), Some("42"));
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_fail_sets_error_only() {
        let mut rec = record(5);
        assert!(rec.fail("boom"));
        let snap = rec.snapshot();
        assert_eq!(snap.status, SessionStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("boom"));
        assert!(snap.final_result.is_none());
    }

    #[test]
    fn test_single_terminal_transition() {
        let mut rec = record(5);
        assert!(rec.fail("first"));
        assert!(!rec.complete(Some("late".to_string())));
        assert!(!rec.fail("second"));

        let snap = rec.snapshot();
        assert_eq!(snap.status, SessionStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("first"));
        assert!(snap.final_result.is_none());
    }

    #[test]
    fn test_record_step_clamps_and_is_monotonic() {
        let mut rec = record(4);
        assert!(rec.record_step(2));
        assert!(rec.record_step(1));
        assert_eq!(rec.snapshot().current_step, 2);
        assert!(rec.record_step(99));
        assert_eq!(rec.snapshot().current_step, 4);
    }

    #[test]
    fn test_record_step_after_terminal_is_ignored() {
        let mut rec = record(4);
        rec.fail("x");
        assert!(!rec.record_step(3));
        assert_eq!(rec.snapshot().current_step, 0);
    }

    #[test]
    fn test_status_serialize() {
        assert_eq!(serde_json::to_string(&SessionStatus::Running).unwrap(), "\"running\"");
        assert_eq!(serde_json::to_string(&SessionStatus::Completed).unwrap(), "\"completed\"");
        assert_eq!(serde_json::to_string(&SessionStatus::Error).unwrap(), "\"error\"");
    }
}

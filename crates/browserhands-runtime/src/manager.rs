//! Session lifecycle manager.
//!
//! A session is admitted by [`SessionLifecycleManager::create_task`], then
//! driven by exactly one background tokio task that runs the engine, records
//! the terminal state, waits out the retention window, and evicts it.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use browserhands_protocols::{
    AutomationEngine, CredentialSource, EngineError, EngineFactory, EngineOutcome, Provider,
    StepProgress, TaskSpec,
};

use crate::error::SessionError;
use crate::registry::SessionRegistry;
use crate::session::{SessionRecord, SessionSnapshot};

/// Limits applied to every session.
#[derive(Debug, Clone)]
pub struct SessionManagerConfig {
    /// Maximum number of tracked sessions.
    pub max_concurrent: usize,

    /// Execution budget for one task.
    pub task_timeout: Duration,

    /// How long a terminal session stays queryable.
    pub retention: Duration,
}

impl Default for SessionManagerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            task_timeout: Duration::from_secs(300),
            retention: Duration::from_secs(300),
        }
    }
}

/// A task request before provider validation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub task: String,
    pub provider: String,
    pub model: String,
    pub max_steps: u32,
    pub headless: bool,
    pub use_vision: bool,
}

/// Admits, runs, and retires automation sessions.
pub struct SessionLifecycleManager {
    registry: Arc<SessionRegistry>,
    factory: Arc<dyn EngineFactory>,
    credentials: Arc<dyn CredentialSource>,
    config: SessionManagerConfig,
}

impl SessionLifecycleManager {
    pub fn new(
        registry: Arc<SessionRegistry>,
        factory: Arc<dyn EngineFactory>,
        credentials: Arc<dyn CredentialSource>,
        config: SessionManagerConfig,
    ) -> Self {
        Self {
            registry,
            factory,
            credentials,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &SessionManagerConfig {
        &self.config
    }

    pub fn active_sessions(&self) -> usize {
        self.registry.count()
    }

    pub fn max_sessions(&self) -> usize {
        self.config.max_concurrent
    }

    /// Admit a task and start it in the background.
    ///
    /// Returns the new session id without waiting for execution.
    pub async fn create_task(&self, request: NewTask) -> Result<String, SessionError> {
        let provider: Provider = request.provider.parse()?;
        let credential = self
            .credentials
            .credential(provider)
            .ok_or_else(|| SessionError::missing_credential(provider))?;

        // Cheap early reject; the authoritative check is in `admit`.
        if self.registry.count() >= self.config.max_concurrent {
            return Err(SessionError::CapacityExceeded {
                max: self.config.max_concurrent,
            });
        }

        let spec = TaskSpec {
            task: request.task,
            provider,
            model: request.model,
            max_steps: request.max_steps,
            headless: request.headless,
            use_vision: request.use_vision,
        };
        let engine = self
            .factory
            .build(&spec, credential)
            .map_err(SessionError::EngineConstruction)?;

        let id = Uuid::new_v4().to_string();
        self.registry.admit(
            SessionRecord::new(id.clone(), spec.max_steps, engine.clone()),
            self.config.max_concurrent,
        )?;

        info!(
            session_id = %id,
            provider = %spec.provider,
            model = %spec.model,
            max_steps = spec.max_steps,
            "Session admitted"
        );

        tokio::spawn(run_session(
            self.registry.clone(),
            id.clone(),
            engine,
            spec.max_steps,
            self.config.clone(),
        ));

        Ok(id)
    }

    pub fn status(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        self.registry.get(id)
    }

    /// Remove a session immediately and tear down its engine.
    pub async fn cancel(&self, id: &str) -> Result<(), SessionError> {
        let record = self
            .registry
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        info!(session_id = %id, status = %record.status(), "Session cancelled");
        teardown_quietly(id, record.engine()).await;
        Ok(())
    }

    /// Tear down every tracked session. Used at process shutdown.
    pub async fn shutdown(&self) {
        let records = self.registry.drain();
        if records.is_empty() {
            return;
        }

        info!(count = records.len(), "Closing active sessions");
        for record in records {
            teardown_quietly(record.id(), record.engine()).await;
        }
    }
}

/// Background unit owning one session from execution to eviction.
async fn run_session(
    registry: Arc<SessionRegistry>,
    id: String,
    engine: Arc<dyn AutomationEngine>,
    max_steps: u32,
    config: SessionManagerConfig,
) {
    let started = Instant::now();
    let outcome = execute(&registry, &id, engine.clone(), max_steps, config.task_timeout).await;

    let recorded = registry.update(&id, |session| match &outcome {
        Ok(outcome) => session.complete(outcome.final_result.clone()),
        Err(e) => session.fail(e.to_string()),
    });

    if recorded.is_none() {
        debug!(session_id = %id, "Session removed before it finished, skipping eviction");
        return;
    }

    match &outcome {
        Ok(_) => info!(
            session_id = %id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Session completed"
        ),
        Err(e) => warn!(
            session_id = %id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Session failed: {}",
            e
        ),
    }

    tokio::time::sleep(config.retention).await;

    if let Some(record) = registry.remove(&id) {
        debug!(session_id = %id, "Evicting session after retention window");
        teardown_quietly(&id, record.engine()).await;
    }
}

/// Run the engine under the task timeout.
///
/// The engine runs on its own task so a panic inside it becomes an error
/// instead of killing the owning unit.
async fn execute(
    registry: &Arc<SessionRegistry>,
    id: &str,
    engine: Arc<dyn AutomationEngine>,
    max_steps: u32,
    timeout: Duration,
) -> Result<EngineOutcome, EngineError> {
    let progress = {
        let registry = registry.clone();
        let id = id.to_string();
        StepProgress::new(move |step| {
            registry.update(&id, |session| session.record_step(step));
        })
    };

    let mut handle = tokio::spawn(async move { engine.execute(max_steps, progress).await });

    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(EngineError::Crashed(join_err.to_string())),
        Err(_) => {
            handle.abort();
            Err(EngineError::Timeout(timeout))
        }
    }
}

async fn teardown_quietly(id: &str, engine: Arc<dyn AutomationEngine>) {
    if let Err(e) = engine.teardown().await {
        warn!(session_id = %id, "Error closing browser session: {}", e);
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

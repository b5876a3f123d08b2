//! Application state.

use std::sync::Arc;
use std::time::Instant;

use browserhands_config::Config;
use browserhands_runtime::SessionLifecycleManager;

/// Values used when a task request leaves a field out.
#[derive(Debug, Clone)]
pub struct TaskDefaults {
    pub provider: String,
    pub model: String,
    pub max_steps: u32,
    pub headless: bool,
    pub use_vision: bool,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_steps: 10,
            headless: true,
            use_vision: true,
        }
    }
}

impl From<&Config> for TaskDefaults {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.llm.default_provider.clone(),
            model: config.llm.default_model.clone(),
            max_steps: config.sessions.default_max_steps,
            ..Self::default()
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub manager: Arc<SessionLifecycleManager>,
    pub defaults: TaskDefaults,
    start_time: Instant,
}

impl AppState {
    pub fn new(manager: Arc<SessionLifecycleManager>, defaults: TaskDefaults) -> Self {
        Self {
            manager,
            defaults,
            start_time: Instant::now(),
        }
    }

    /// Get uptime.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

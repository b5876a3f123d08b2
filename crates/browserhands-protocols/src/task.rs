//! Task parameters handed to the automation engine.

use serde::{Deserialize, Serialize};

use crate::provider::Provider;

/// Everything an engine needs to run one automation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Natural-language task for the browser agent.
    pub task: String,

    pub provider: Provider,

    pub model: String,

    /// Upper bound on agent steps.
    pub max_steps: u32,

    pub headless: bool,

    pub use_vision: bool,
}

impl TaskSpec {
    pub fn new(task: impl Into<String>, provider: Provider, model: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            provider,
            model: model.into(),
            max_steps: 10,
            headless: true,
            use_vision: true,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_vision(mut self, use_vision: bool) -> Self {
        self.use_vision = use_vision;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = TaskSpec::new("open example.com", Provider::OpenAi, "gpt-4o-mini");
        assert_eq!(spec.max_steps, 10);
        assert!(spec.headless);
        assert!(spec.use_vision);
    }

    #[test]
    fn test_builder() {
        let spec = TaskSpec::new("t", Provider::Google, "gemini")
            .with_max_steps(3)
            .with_headless(false)
            .with_vision(false);
        assert_eq!(spec.max_steps, 3);
        assert!(!spec.headless);
        assert!(!spec.use_vision);
    }

    #[test]
    fn test_serialize_shape() {
        let spec = TaskSpec::new("search", Provider::Anthropic, "claude");
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["provider"], "anthropic");
        assert_eq!(value["task"], "search");
        assert_eq!(value["max_steps"], 10);
    }
}

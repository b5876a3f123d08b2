//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::redis::RedisConfig;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub sessions: SessionsConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub redis: RedisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Defaults applied to task requests that leave them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub default_provider: String,

    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            default_model: default_model(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Session lifecycle limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Maximum number of tracked sessions.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Per-task execution budget.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// How long a finished session stays queryable.
    #[serde(default = "default_retention")]
    pub retention_seconds: u64,

    #[serde(default = "default_max_steps")]
    pub default_max_steps: u32,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            timeout_seconds: default_timeout(),
            retention_seconds: default_retention(),
            default_max_steps: default_max_steps(),
        }
    }
}

fn default_max_concurrent() -> usize {
    3
}

fn default_timeout() -> u64 {
    300
}

fn default_retention() -> u64 {
    300
}

fn default_max_steps() -> u32 {
    10
}

/// External runner that performs the browser automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_command")]
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

fn default_engine_command() -> String {
    "browserhands-runner".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files. Console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.default_provider, "openai");
        assert_eq!(config.llm.default_model, "gpt-4o-mini");
        assert_eq!(config.sessions.max_concurrent, 3);
        assert_eq!(config.sessions.timeout_seconds, 300);
        assert_eq!(config.sessions.retention_seconds, 300);
        assert_eq!(config.sessions.default_max_steps, 10);
        assert_eq!(config.engine.command, "browserhands-runner");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[sessions]\nmax_concurrent = 8\n").unwrap();
        assert_eq!(config.sessions.max_concurrent, 8);
        assert_eq!(config.sessions.timeout_seconds, 300);
    }
}

//! Configuration validation.

use browserhands_protocols::Provider;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_llm(config, &mut result);
        Self::validate_sessions(config, &mut result);
        Self::validate_engine(config, &mut result);
        Self::validate_redis(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_llm(config: &Config, result: &mut ValidationResult) {
        if let Err(e) = config.llm.default_provider.parse::<Provider>() {
            result.add_error(ValidationError::new("llm.default_provider", e.to_string()));
        }

        if config.llm.default_model.is_empty() {
            result.add_error(ValidationError::new(
                "llm.default_model",
                "Default model cannot be empty",
            ));
        }
    }

    fn validate_sessions(config: &Config, result: &mut ValidationResult) {
        let sessions = &config.sessions;

        if sessions.max_concurrent == 0 {
            result.add_error(ValidationError::new(
                "sessions.max_concurrent",
                "max_concurrent must be greater than 0",
            ));
        }

        if sessions.max_concurrent > 50 {
            result.add_warning(ValidationWarning::new(
                "sessions.max_concurrent",
                "max_concurrent is very high (>50), each session runs its own browser",
            ));
        }

        if sessions.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "sessions.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if sessions.default_max_steps == 0 {
            result.add_error(ValidationError::new(
                "sessions.default_max_steps",
                "default_max_steps must be greater than 0",
            ));
        }

        if sessions.retention_seconds < 10 {
            result.add_warning(ValidationWarning::new(
                "sessions.retention_seconds",
                "retention below 10s leaves clients little time to poll results",
            ));
        }
    }

    fn validate_engine(config: &Config, result: &mut ValidationResult) {
        if config.engine.command.trim().is_empty() {
            result.add_error(ValidationError::new(
                "engine.command",
                "Engine command cannot be empty",
            ));
        }

        if let Some(dir) = &config.engine.working_dir {
            if !dir.exists() {
                result.add_warning(ValidationWarning::new(
                    "engine.working_dir",
                    format!("Working directory does not exist: {:?}", dir),
                ));
            }
        }
    }

    fn validate_redis(config: &Config, result: &mut ValidationResult) {
        if let Err(e) = config.redis.resolve() {
            result.add_error(ValidationError::new("redis", e.to_string()));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

//! Configuration loader.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    fn expand_paths(config: &mut Config) {
        for path in [&mut config.logging.dir, &mut config.engine.working_dir]
            .into_iter()
            .flatten()
        {
            let expanded = Self::expand_path(&path.to_string_lossy());
            *path = expanded.into();
        }
    }

    /// Load a file if it exists, fall back to defaults otherwise, then apply
    /// process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Config, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Config::default()
        };
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay deployment environment variables onto `config`.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            config.server.host = host;
        }
        if let Some(port) = get("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }
        if let Some(provider) = get("DEFAULT_LLM_PROVIDER") {
            config.llm.default_provider = provider;
        }
        if let Some(model) = get("DEFAULT_MODEL") {
            config.llm.default_model = model;
        }
        if let Some(max) = get("MAX_CONCURRENT_SESSIONS") {
            config.sessions.max_concurrent = parse_var("MAX_CONCURRENT_SESSIONS", &max)?;
        }
        if let Some(timeout) = get("BROWSER_TIMEOUT") {
            config.sessions.timeout_seconds = parse_var("BROWSER_TIMEOUT", &timeout)?;
        }
        if let Some(retention) = get("SESSION_RETENTION_SECONDS") {
            config.sessions.retention_seconds =
                parse_var("SESSION_RETENTION_SECONDS", &retention)?;
        }
        if let Some(command) = get("BROWSER_ENGINE_COMMAND") {
            config.engine.command = command;
        }

        if let Some(url) = get("REDIS_URL") {
            config.redis.url = Some(url);
        }
        if let Some(host) = get("REDIS_HOST") {
            config.redis.host = Some(host);
        }
        if let Some(port) = get("REDIS_PORT") {
            config.redis.port = Some(parse_var("REDIS_PORT", &port)?);
        }
        if let Some(password) = get("REDIS_PASSWORD") {
            config.redis.password = Some(password);
        }
        if let Some(db) = get("REDIS_DB") {
            config.redis.db = Some(parse_var("REDIS_DB", &db)?);
        }

        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.browserhands`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid_value(name, format!("'{}': {}", raw, e)))
}

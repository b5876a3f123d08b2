//! Server wiring: tracing, session manager, and HTTP server.

use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use browserhands_api::{ApiConfig, ApiServer, AppState, TaskDefaults};
use browserhands_config::{Config, ConfigValidator, LoggingConfig, ValidationResult};
use browserhands_protocols::EnvCredentials;
use browserhands_runtime::{
    ProcessEngineConfig, ProcessEngineFactory, SessionLifecycleManager, SessionManagerConfig,
    SessionRegistry,
};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console output, plus daily rolling files when
/// `logging.dir` is set.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("browserhands")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

pub(crate) fn manager_config(config: &Config) -> SessionManagerConfig {
    SessionManagerConfig {
        max_concurrent: config.sessions.max_concurrent,
        task_timeout: Duration::from_secs(config.sessions.timeout_seconds),
        retention: Duration::from_secs(config.sessions.retention_seconds),
    }
}

pub(crate) fn engine_config(config: &Config) -> ProcessEngineConfig {
    let mut engine = ProcessEngineConfig::new(config.engine.command.clone())
        .with_args(config.engine.args.iter().cloned());
    engine.working_dir = config.engine.working_dir.clone();
    engine
}

fn format_issues(result: &ValidationResult) -> Vec<String> {
    result
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect()
}

/// Run the server in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> anyhow::Result<()> {
    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for issue in format_issues(&validation) {
            error!("Config error at {}", issue);
        }
        bail!("invalid configuration ({} errors)", validation.errors.len());
    }

    match config.redis.resolve()? {
        Some(redis) => info!(url = %redis.redacted_url(), "Redis settings resolved"),
        None => info!("Redis not configured"),
    }

    let factory = Arc::new(ProcessEngineFactory::new(engine_config(&config)));
    let manager = Arc::new(SessionLifecycleManager::new(
        Arc::new(SessionRegistry::new()),
        factory,
        Arc::new(EnvCredentials),
        manager_config(&config),
    ));
    info!(
        max_concurrent = config.sessions.max_concurrent,
        timeout_secs = config.sessions.timeout_seconds,
        retention_secs = config.sessions.retention_seconds,
        engine = %config.engine.command,
        "Session manager ready"
    );

    let state = Arc::new(AppState::new(manager, TaskDefaults::from(&config)));
    let server = ApiServer::new(ApiConfig::from(&config), state);

    server.run_until_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for Ctrl-C, shutting down: {}", e),
    }
}

/// Validate the configuration and print the findings.
pub(crate) fn check_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    let validation = ConfigValidator::validate(config);

    if path.exists() {
        println!("Configuration: {}", path.display());
    } else {
        println!("Configuration: {} (not found, using defaults)", path.display());
    }
    for warning in &validation.warnings {
        println!("  warning  {}: {}", warning.path, warning.message);
    }
    for issue in format_issues(&validation) {
        println!("  error    {}", issue);
    }

    if !validation.is_valid() {
        bail!("configuration has {} errors", validation.errors.len());
    }

    if let Some(redis) = config.redis.resolve()? {
        println!("  redis    {}", redis.redacted_url());
    }
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_manager_config_from_config() {
        let mut config = Config::default();
        config.sessions.max_concurrent = 7;
        config.sessions.timeout_seconds = 120;
        config.sessions.retention_seconds = 30;

        let manager = manager_config(&config);
        assert_eq!(manager.max_concurrent, 7);
        assert_eq!(manager.task_timeout, Duration::from_secs(120));
        assert_eq!(manager.retention, Duration::from_secs(30));
    }

    #[test]
    fn test_engine_config_from_config() {
        let mut config = Config::default();
        config.engine.command = "python".to_string();
        config.engine.args = vec!["-m".to_string(), "runner".to_string()];
        config.engine.working_dir = Some(PathBuf::from("/srv/runner"));

        let engine = engine_config(&config);
        assert_eq!(engine.command, "python");
        assert_eq!(engine.args, vec!["-m", "runner"]);
        assert_eq!(engine.working_dir, Some(PathBuf::from("/srv/runner")));
    }

    #[test]
    fn test_check_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(check_config(&path, &Config::default()).is_ok());
    }

    #[test]
    fn test_check_config_rejects_invalid() {
        let mut config = Config::default();
        config.sessions.max_concurrent = 0;
        let dir = tempfile::tempdir().unwrap();
        assert!(check_config(&dir.path().join("c.toml"), &config).is_err());
    }

    #[tokio::test]
    async fn test_run_server_rejects_invalid_config() {
        let mut config = Config::default();
        config.llm.default_provider = "unsupported".to_string();
        let err = run_server(config).await.unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}

//! Engine backed by an external runner process.
//!
//! One runner process is launched per task. The task is written to its stdin
//! as a single JSON line, the provider credential is injected through the
//! provider's API key variable, and the runner reports back with
//! newline-delimited JSON on stdout:
//!
//! ```text
//! {"type":"step","step":3}
//! {"type":"result","final_result":"..."}
//! {"type":"error","message":"..."}
//! ```

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use browserhands_protocols::{
    AutomationEngine, Credential, EngineError, EngineFactory, EngineOutcome, StepProgress,
    TaskSpec,
};

/// How to launch the runner.
#[derive(Debug, Clone)]
pub struct ProcessEngineConfig {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessEngineConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Builds a [`ProcessEngine`] per admitted task.
pub struct ProcessEngineFactory {
    config: ProcessEngineConfig,
}

impl ProcessEngineFactory {
    pub fn new(config: ProcessEngineConfig) -> Self {
        Self { config }
    }
}

impl EngineFactory for ProcessEngineFactory {
    fn build(
        &self,
        spec: &TaskSpec,
        credential: Credential,
    ) -> Result<Arc<dyn AutomationEngine>, EngineError> {
        if self.config.command.trim().is_empty() {
            return Err(EngineError::construction("engine command is empty"));
        }
        if let Some(dir) = &self.config.working_dir {
            if !dir.is_dir() {
                return Err(EngineError::construction(format!(
                    "engine working directory {:?} does not exist",
                    dir
                )));
            }
        }

        Ok(Arc::new(ProcessEngine {
            config: self.config.clone(),
            spec: spec.clone(),
            credential,
            cancel: CancellationToken::new(),
        }))
    }
}

/// Task line written to the runner's stdin.
#[derive(Debug, Serialize)]
struct RunnerInput<'a> {
    #[serde(flatten)]
    spec: &'a TaskSpec,
    step_limit: u32,
}

/// Event line read from the runner's stdout.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RunnerEvent {
    Step { step: u32 },
    Result { final_result: Option<String> },
    Error { message: String },
}

pub struct ProcessEngine {
    config: ProcessEngineConfig,
    spec: TaskSpec,
    credential: Credential,
    cancel: CancellationToken,
}

impl ProcessEngine {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .env(self.spec.provider.credential_var(), self.credential.expose())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl AutomationEngine for ProcessEngine {
    async fn execute(
        &self,
        step_limit: u32,
        progress: StepProgress,
    ) -> Result<EngineOutcome, EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::execution("task cancelled before start"));
        }

        let mut child = self.command().spawn().map_err(|e| {
            EngineError::execution(format!("failed to spawn {}: {}", self.config.command, e))
        })?;

        let input = serde_json::to_string(&RunnerInput {
            spec: &self.spec,
            step_limit,
        })
        .map_err(|e| EngineError::execution(format!("failed to encode task: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A runner that exits without reading stdin is judged by its output.
            if let Err(e) = stdin.write_all(format!("{}\n", input).as_bytes()).await {
                debug!("runner stdin closed early: {}", e);
            }
        }

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::execution("failed to capture runner stdout"))?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("runner stderr: {}", line);
                }
            });
        }

        let mut lines = BufReader::new(stdout).lines();
        let mut result: Option<Result<EngineOutcome, EngineError>> = None;

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line,
                () = self.cancel.cancelled() => {
                    let _ = child.kill().await;
                    return Err(EngineError::execution("task cancelled"));
                }
            };

            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    return Err(EngineError::execution(format!(
                        "failed reading runner output: {}",
                        e
                    )));
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<RunnerEvent>(line) {
                Ok(RunnerEvent::Step { step }) => progress.report(step),
                Ok(RunnerEvent::Result { final_result }) => {
                    result = Some(Ok(EngineOutcome { final_result }));
                }
                Ok(RunnerEvent::Error { message }) => {
                    result = Some(Err(EngineError::Execution(message)));
                }
                Err(e) => debug!("non-event runner output: {} ({})", line, e),
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| EngineError::execution(format!("failed waiting for runner: {}", e)))?;

        match result {
            Some(outcome) => outcome,
            None if status.success() => Ok(EngineOutcome::empty()),
            None => Err(EngineError::execution(format!(
                "runner exited with status {}",
                status.code().unwrap_or(-1)
            ))),
        }
    }

    async fn teardown(&self) -> Result<(), EngineError> {
        self.cancel.cancel();
        Ok(())
    }
}

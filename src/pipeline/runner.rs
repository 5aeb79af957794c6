use crate::error::{MigrateError, Result};
use crate::pipeline::command::{Pipeline, StageCommand};
use std::future::Future;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// What one stage left behind after it exited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcome {
    pub success: bool,
    /// None when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StageOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// Human-readable reason for a failed stage
    pub fn describe_failure(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "was terminated by a signal".to_string(),
        };

        let stderr = self.stderr.trim();
        let detail = if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        };

        if detail.is_empty() {
            status
        } else {
            format!("{}: {}", status, detail)
        }
    }
}

impl From<Output> for StageOutcome {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub dump: StageOutcome,
    pub restore: StageOutcome,
}

/// Runs a dump/restore pipeline to completion.
///
/// Implementations return `Err` only when a stage could not be started; a
/// stage that ran and failed is reported through its [`StageOutcome`].
pub trait CommandRunner {
    fn run(&self, pipeline: &Pipeline) -> impl Future<Output = Result<PipelineOutput>> + Send;
}

/// Spawns both programs and connects dump stdout to restore stdin directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

fn command_for(stage: &StageCommand) -> Command {
    let mut command = Command::new(&stage.program);
    command
        .args(&stage.args)
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

fn spawn_error(stage: &StageCommand, e: std::io::Error) -> MigrateError {
    MigrateError::execution(&stage.program, format!("could not be started: {}", e))
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, pipeline: &Pipeline) -> Result<PipelineOutput> {
        let mut dump = command_for(&pipeline.dump)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&pipeline.dump, e))?;

        let dump_stdout: Stdio = dump
            .stdout
            .take()
            .ok_or_else(|| MigrateError::execution(&pipeline.dump.program, "stdout was not captured"))?
            .try_into()
            .map_err(|e| spawn_error(&pipeline.dump, e))?;

        // If this fails, dropping `dump` kills it
        let restore = command_for(&pipeline.restore)
            .stdin(dump_stdout)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&pipeline.restore, e))?;

        let (dump_output, restore_output) =
            tokio::join!(dump.wait_with_output(), restore.wait_with_output());

        Ok(PipelineOutput {
            dump: dump_output
                .map_err(|e| MigrateError::execution(&pipeline.dump.program, e.to_string()))?
                .into(),
            restore: restore_output
                .map_err(|e| MigrateError::execution(&pipeline.restore.program, e.to_string()))?
                .into(),
        })
    }
}

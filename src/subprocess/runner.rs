use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::error::ProcessError;

#[derive(Debug, Clone)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(*code),
            ExitStatus::Signal(_) => None,
        }
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Success => write!(f, "0"),
            ExitStatus::Error(code) => write!(f, "{code}"),
            ExitStatus::Signal(signal) => write!(f, "signal {signal}"),
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError>;
}

pub struct TokioProcessRunner;

impl TokioProcessRunner {
    /// Configure the command with environment and working directory
    fn configure_command(command: &ProcessCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args);

        // The resolved environment table is applied on top of the inherited
        // process environment, so PATH and friends stay intact.
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());
        cmd
    }

    /// Convert a std ExitStatus to our ExitStatus enum
    fn parse_exit_status(status: std::process::ExitStatus) -> ExitStatus {
        if status.success() {
            ExitStatus::Success
        } else if let Some(code) = status.code() {
            ExitStatus::Error(code)
        } else {
            Self::parse_signal_status(status)
        }
    }

    #[cfg(unix)]
    fn parse_signal_status(status: std::process::ExitStatus) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            ExitStatus::Signal(signal)
        } else {
            ExitStatus::Error(1)
        }
    }

    #[cfg(not(unix))]
    fn parse_signal_status(_status: std::process::ExitStatus) -> ExitStatus {
        ExitStatus::Error(1)
    }

    /// Map spawn error to ProcessError
    fn map_spawn_error(error: std::io::Error, command: &ProcessCommand) -> ProcessError {
        if error.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(command.program.clone())
        } else {
            ProcessError::SpawnFailed {
                command: format!("{} {}", command.program, command.args.join(" ")),
                source: error,
            }
        }
    }

    fn log_result(result: &ProcessOutput, command: &ProcessCommand) {
        let command_str = format!("{} {}", command.program, command.args.join(" "));
        match &result.status {
            ExitStatus::Success => {
                tracing::debug!("Subprocess completed successfully: {}", command_str);
            }
            ExitStatus::Error(code) => {
                tracing::debug!(
                    "Subprocess failed with exit code {}: {}",
                    code,
                    command_str
                );
            }
            ExitStatus::Signal(signal) => {
                tracing::warn!(
                    "Subprocess terminated by signal {}: {}",
                    signal,
                    command_str
                );
            }
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        tracing::debug!(
            "Executing subprocess: {} {}",
            command.program,
            command.args.join(" ")
        );
        if let Some(ref dir) = command.working_dir {
            tracing::trace!("Working directory: {:?}", dir);
        }

        let mut cmd = Self::configure_command(&command);
        let child = cmd
            .spawn()
            .map_err(|e| Self::map_spawn_error(e, &command))?;

        let output = child.wait_with_output().await.map_err(ProcessError::Io)?;

        let result = ProcessOutput {
            status: Self::parse_exit_status(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        Self::log_result(&result, &command);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_command(program: &str, args: &[&str]) -> ProcessCommand {
        ProcessCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            env: BTreeMap::new(),
            working_dir: None,
        }
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = TokioProcessRunner;
        let output = runner
            .run(test_command("sh", &["-c", "echo hello"]))
            .await
            .unwrap();

        assert!(output.status.success());
        assert_eq!(output.stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let runner = TokioProcessRunner;
        let output = runner
            .run(test_command("sh", &["-c", "exit 3"]))
            .await
            .unwrap();

        assert_eq!(output.status, ExitStatus::Error(3));
        assert_eq!(output.status.code(), Some(3));
    }

    #[tokio::test]
    async fn test_run_applies_environment() {
        let runner = TokioProcessRunner;
        let mut command = test_command("sh", &["-c", "printf '%s' \"$STEP_VAR\""]);
        command
            .env
            .insert("STEP_VAR".to_string(), "expected".to_string());

        let output = runner.run(command).await.unwrap();
        assert_eq!(output.stdout, "expected");
    }

    #[tokio::test]
    async fn test_run_nonexistent_command() {
        let runner = TokioProcessRunner;
        let result = runner
            .run(test_command("nonexistent_command_12345", &[]))
            .await;

        match result.unwrap_err() {
            ProcessError::CommandNotFound(program) => {
                assert_eq!(program, "nonexistent_command_12345");
            }
            other => panic!("Expected CommandNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_status_display() {
        assert_eq!(ExitStatus::Success.to_string(), "0");
        assert_eq!(ExitStatus::Error(128).to_string(), "128");
        assert_eq!(ExitStatus::Signal(9).to_string(), "signal 9");
    }
}

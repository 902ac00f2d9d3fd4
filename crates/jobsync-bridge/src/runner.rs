use std::future::Future;
use std::process::Stdio;

/// A bridge invocation: program, arguments, and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeCommand {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl BridgeCommand {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Command line for logs and error messages. Environment values are
    /// left out since they carry the token.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs a [`BridgeCommand`] to completion.
pub trait CommandRunner: Send + Sync {
    /// Execute `command` and capture its output.
    ///
    /// An `Err` means the process could not be started; a non-zero exit is
    /// reported through [`CommandOutput::success`].
    fn run(
        &self,
        command: &BridgeCommand,
    ) -> impl Future<Output = std::io::Result<CommandOutput>> + Send;
}

/// Spawns real child processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &BridgeCommand) -> std::io::Result<CommandOutput> {
        let output = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_environment() {
        let cmd = BridgeCommand::new("databricks")
            .arg("jobs")
            .arg("list")
            .env("DATABRICKS_TOKEN", "dapi-secret");
        assert_eq!(cmd.display(), "databricks jobs list");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_captures_stdout_and_exit_code() {
        let cmd = BridgeCommand::new("sh").arg("-c").arg("printf hello; exit 3");
        let output = ProcessRunner.run(&cmd).await.expect("spawn sh");
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.code, Some(3));
        assert!(!output.success);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_passes_environment() {
        let cmd = BridgeCommand::new("sh")
            .arg("-c")
            .arg("printf '%s' \"$DATABRICKS_HOST\"")
            .env("DATABRICKS_HOST", "https://example.cloud.databricks.com");
        let output = ProcessRunner.run(&cmd).await.expect("spawn sh");
        assert!(output.success);
        assert_eq!(output.stdout, "https://example.cloud.databricks.com");
    }

    #[tokio::test]
    async fn process_runner_reports_missing_binary() {
        let cmd = BridgeCommand::new("/nonexistent/jobsync-bridge-binary");
        let err = ProcessRunner.run(&cmd).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}

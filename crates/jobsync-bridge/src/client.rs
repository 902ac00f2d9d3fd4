//! [`JobRegistry`] implementation backed by the Databricks CLI.
//!
//! Each operation maps to one CLI call:
//!
//! | operation | command |
//! |---|---|
//! | list | `jobs list --output JSON` |
//! | create | `jobs create --json-file <scratch>` |
//! | update | `jobs reset --job-id <id> --json-file <scratch>` |
//! | run | `jobs run-now --job-id <id>` |
//! | API version | `jobs configure --version=<v>` |

use std::path::PathBuf;

use jobsync_core::config::{HOST_VAR, TOKEN_VAR};
use jobsync_core::{AppConfig, JobDefinition, JobId, JobRegistry, JobSummary, RegistryError, RunId};

use crate::response::{decode_created, decode_job_list, decode_run};
use crate::runner::{BridgeCommand, CommandRunner, ProcessRunner};
use crate::scratch::ScratchFile;

/// Everything the client needs to reach the registry.
#[derive(Clone)]
pub struct BridgeSettings {
    pub program: String,
    pub host: String,
    pub token: String,
    pub jobs_api_version: String,
    pub scratch_dir: Option<PathBuf>,
}

impl BridgeSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            program: config.cli_bin.clone(),
            host: config.host.clone(),
            token: config.token.clone(),
            jobs_api_version: config.jobs_api_version.clone(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }
}

impl std::fmt::Debug for BridgeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeSettings")
            .field("program", &self.program)
            .field("host", &self.host)
            .field("token", &"[redacted]")
            .field("jobs_api_version", &self.jobs_api_version)
            .field("scratch_dir", &self.scratch_dir)
            .finish()
    }
}

/// Registry client that shells out to the Databricks CLI.
///
/// Use [`DatabricksCli::new`] for real processes or
/// [`DatabricksCli::with_runner`] to substitute a scripted runner in tests.
pub struct DatabricksCli<R = ProcessRunner> {
    runner: R,
    settings: BridgeSettings,
}

impl DatabricksCli<ProcessRunner> {
    #[must_use]
    pub fn new(settings: BridgeSettings) -> Self {
        Self::with_runner(settings, ProcessRunner)
    }
}

impl<R: CommandRunner> DatabricksCli<R> {
    #[must_use]
    pub fn with_runner(settings: BridgeSettings, runner: R) -> Self {
        Self { runner, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Pin the CLI to the configured Jobs API version.
    ///
    /// Callers log a failure here and carry on; older and newer CLIs reject
    /// the subcommand without that being a problem for the other operations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Spawn`] or [`RegistryError::CommandFailed`].
    pub async fn configure_api_version(&self) -> Result<(), RegistryError> {
        let command = self
            .command()
            .arg("jobs")
            .arg("configure")
            .arg(format!("--version={}", self.settings.jobs_api_version));
        self.execute(command).await.map(|_| ())
    }

    /// Base command with credentials set on the child's environment.
    fn command(&self) -> BridgeCommand {
        BridgeCommand::new(&self.settings.program)
            .env(HOST_VAR, &self.settings.host)
            .env(TOKEN_VAR, &self.settings.token)
    }

    /// Run `command` and return its stdout, failing on a non-zero exit.
    async fn execute(&self, command: BridgeCommand) -> Result<String, RegistryError> {
        let rendered = command.display();
        tracing::debug!(command = %rendered, "running bridge command");

        let output = self
            .runner
            .run(&command)
            .await
            .map_err(|source| RegistryError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !output.success {
            return Err(RegistryError::CommandFailed {
                command: rendered,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl<R: CommandRunner> JobRegistry for DatabricksCli<R> {
    async fn list_jobs(&self) -> Result<Vec<JobSummary>, RegistryError> {
        let command = self
            .command()
            .arg("jobs")
            .arg("list")
            .arg("--output")
            .arg("JSON");
        let stdout = self.execute(command).await?;

        let jobs = decode_job_list(&stdout).map_err(|source| RegistryError::Decode {
            context: "jobs list".to_string(),
            source,
        })?;
        tracing::debug!(count = jobs.len(), "listed registry jobs");
        Ok(jobs)
    }

    async fn create_job(&self, definition: &JobDefinition) -> Result<Option<JobId>, RegistryError> {
        let scratch = ScratchFile::write(self.settings.scratch_dir.as_deref(), definition)?;
        let command = self
            .command()
            .arg("jobs")
            .arg("create")
            .arg("--json-file")
            .arg(scratch.path().to_string_lossy());

        let result = self.execute(command).await;
        scratch.remove();
        let stdout = result?;

        match decode_created(&stdout) {
            Ok(Some(job_id)) => {
                tracing::info!(%job_id, "job created");
                Ok(Some(job_id))
            }
            Ok(None) => {
                tracing::warn!("job created but the response carried no job_id");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "job created but the response was not JSON");
                Ok(None)
            }
        }
    }

    async fn update_job(
        &self,
        job_id: &JobId,
        definition: &JobDefinition,
    ) -> Result<(), RegistryError> {
        let scratch = ScratchFile::write(self.settings.scratch_dir.as_deref(), definition)?;
        let command = self
            .command()
            .arg("jobs")
            .arg("reset")
            .arg("--job-id")
            .arg(job_id.as_str())
            .arg("--json-file")
            .arg(scratch.path().to_string_lossy());

        let result = self.execute(command).await;
        scratch.remove();
        result?;

        tracing::info!(%job_id, "job updated");
        Ok(())
    }

    async fn run_job(&self, job_id: &JobId) -> Result<Option<RunId>, RegistryError> {
        let command = self
            .command()
            .arg("jobs")
            .arg("run-now")
            .arg("--job-id")
            .arg(job_id.as_str());
        let stdout = self.execute(command).await?;

        match decode_run(&stdout) {
            Ok(run_id) => Ok(run_id),
            Err(e) => {
                tracing::warn!(%job_id, error = %e, "run triggered but the response was not JSON");
                Ok(None)
            }
        }
    }
}

use thiserror::Error;

/// Errors raised while loading configuration: env vars or the job file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("job config file not found: {path}")]
    NotFound { path: String },

    #[error("invalid JSON in job config {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("failed to read job config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Errors returned by a [`crate::JobRegistry`] implementation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The bridge binary could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The bridge ran and exited non-zero.
    #[error("command `{command}` failed ({}): {stderr}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("could not decode {context} response: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the payload scratch file failed.
    #[error("scratch file error: {0}")]
    Scratch(#[source] std::io::Error),
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("job name not found in configuration")]
    MissingName,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

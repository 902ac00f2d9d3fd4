use std::path::PathBuf;

/// Process-level settings: registry credentials plus bridge tuning.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub token: String,
    pub cli_bin: String,
    pub jobs_api_version: String,
    pub scratch_dir: Option<PathBuf>,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("token", &"[redacted]")
            .field("cli_bin", &self.cli_bin)
            .field("jobs_api_version", &self.jobs_api_version)
            .field("scratch_dir", &self.scratch_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

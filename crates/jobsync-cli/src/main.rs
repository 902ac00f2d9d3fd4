use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod manage;

#[derive(Debug, Parser)]
#[command(name = "jobsync")]
#[command(about = "Create or update a Databricks job from a JSON definition")]
struct Cli {
    /// Path to job configuration JSON file
    #[arg(long)]
    config: PathBuf,
    /// Update the job if one with the same name already exists
    #[arg(long)]
    force_update: bool,
    /// Trigger a job run after creation or update
    #[arg(long)]
    run: bool,
    /// Show what would happen without creating, updating or running anything
    #[arg(long)]
    dry_run: bool,
}

impl From<Cli> for manage::ManageOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            force_update: cli.force_update,
            run: cli.run,
            dry_run: cli.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Credentials are checked before anything touches the bridge.
    let config = jobsync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = jobsync_bridge::DatabricksCli::new(
        jobsync_bridge::BridgeSettings::from_app_config(&config),
    );
    manage::run_manage(&client, &config.host, &cli.into()).await
}

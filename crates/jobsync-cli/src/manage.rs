//! The `jobsync` run: configure the bridge, reconcile the job, optionally
//! trigger a run, and print progress for whoever is watching the CI log.

use std::path::PathBuf;

use jobsync_bridge::{CommandRunner, DatabricksCli};
use jobsync_core::{
    apply, job_name, job_url, load_job_definition, plan, run_url, Action, JobRegistry, Plan,
};

const RULE: &str = "============================================================";

#[derive(Debug, Clone)]
pub(crate) struct ManageOptions {
    pub config_path: PathBuf,
    pub force_update: bool,
    pub run: bool,
    pub dry_run: bool,
}

/// Reconcile the job described by `opts.config_path` against the registry.
///
/// A dry run stops after the plan is printed: no API-version configure, no
/// create, update or run.
///
/// # Errors
///
/// Returns an error if the job file cannot be loaded, has no name, or the
/// create, update or run call fails. A failed listing or API-version
/// configure only logs a warning.
pub(crate) async fn run_manage<R: CommandRunner>(
    client: &DatabricksCli<R>,
    host: &str,
    opts: &ManageOptions,
) -> anyhow::Result<()> {
    if !opts.dry_run {
        configure_api_version(client).await;
    }

    println!("{RULE}");
    println!("Databricks Job Management");
    println!("{RULE}");

    let definition = load_job_definition(&opts.config_path)?;
    println!(
        "Loaded job configuration from {}",
        opts.config_path.display()
    );

    let name = job_name(&definition)?;
    println!("Managing job: {name}");

    let planned = plan(client, &definition, opts.force_update).await?;
    match &planned {
        Plan::Create => println!("Job does not exist, creating new job"),
        Plan::Update(job_id) => println!("Job already exists with ID: {job_id}"),
        Plan::Skip(job_id) => {
            println!("Job already exists with ID: {job_id}");
            println!("Skipping update (use --force-update to update existing job)");
        }
    }

    if opts.dry_run {
        let verb = match planned {
            Plan::Create => "create",
            Plan::Update(_) => "update",
            Plan::Skip(_) => "leave unchanged",
        };
        println!("dry-run: would {verb} job '{name}'");
        if opts.run {
            println!("dry-run: would trigger a run");
        }
        return Ok(());
    }

    let outcome = apply(client, &definition, planned).await?;
    tracing::info!(job = name, action = %outcome.action, "reconciled job");
    match (outcome.action, &outcome.job_id) {
        (Action::Created, Some(job_id)) => {
            println!("Job created successfully! Job ID: {job_id}");
        }
        (Action::Created, None) => println!("Job created successfully!"),
        (Action::Updated, Some(job_id)) => {
            println!("Job updated successfully! Job ID: {job_id}");
        }
        _ => {}
    }

    let job_link = outcome.job_id.as_ref().map(|job_id| job_url(host, job_id));
    if let Some(link) = &job_link {
        println!("\nJob URL: {link}");
    }

    if opts.run {
        match &outcome.job_id {
            Some(job_id) => {
                println!("\nTriggering job run...");
                match client.run_job(job_id).await? {
                    Some(run_id) => {
                        println!("Job run triggered! Run ID: {run_id}");
                        if let Some(link) = &job_link {
                            println!("Run URL: {}", run_url(link, &run_id));
                        }
                    }
                    None => println!("Job run triggered!"),
                }
            }
            None => tracing::warn!(job = name, "job id unknown; not triggering a run"),
        }
    }

    println!("\n{RULE}");
    println!("Job management completed successfully!");
    println!("{RULE}");
    Ok(())
}

/// Failure here never stops the run.
async fn configure_api_version<R: CommandRunner>(client: &DatabricksCli<R>) {
    let version = &client.settings().jobs_api_version;
    println!("Configuring Databricks CLI to use Jobs API {version}...");
    match client.configure_api_version().await {
        Ok(()) => println!("Jobs API {version} configured"),
        Err(e) => {
            tracing::warn!(error = %e, "could not configure Jobs API version, continuing anyway");
        }
    }
}

#[cfg(test)]
#[path = "manage_test.rs"]
mod tests;

//! Create-or-update decision for a single job definition.
//!
//! Identity is the job's `name` and nothing else. Renaming a job in its
//! definition therefore creates a second job; the old one is left alone.

use crate::{JobDefinition, JobId, JobRegistry, JobSummary, ReconcileError};

/// What reconciliation will do, decided from current registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Create,
    Update(JobId),
    Skip(JobId),
}

/// What reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Skipped,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Created => write!(f, "created"),
            Action::Updated => write!(f, "updated"),
            Action::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub action: Action,
    /// `None` only when a create succeeded without reporting an identifier.
    pub job_id: Option<JobId>,
}

/// The definition's `name`, the only key matched against the registry.
///
/// # Errors
///
/// Returns [`ReconcileError::MissingName`] if `name` is absent, not a
/// string, or empty.
pub fn job_name(definition: &JobDefinition) -> Result<&str, ReconcileError> {
    definition.name().ok_or(ReconcileError::MissingName)
}

/// Decide between create, update and skip without mutating the registry.
///
/// A listing failure is logged and treated as "no such job", so the plan
/// falls through to [`Plan::Create`]. When the registry reports the same name
/// more than once, the first entry wins.
///
/// # Errors
///
/// Returns [`ReconcileError::MissingName`] before any registry call if the
/// definition has no usable `name`.
pub async fn plan<R: JobRegistry>(
    registry: &R,
    definition: &JobDefinition,
    force_update: bool,
) -> Result<Plan, ReconcileError> {
    let name = job_name(definition)?;

    let existing = match registry.list_jobs().await {
        Ok(jobs) => find_existing(&jobs, name),
        Err(e) => {
            tracing::warn!(
                job = name,
                error = %e,
                "could not list existing jobs; assuming job does not exist"
            );
            None
        }
    };

    let plan = match existing {
        None => Plan::Create,
        Some(job_id) if force_update => Plan::Update(job_id),
        Some(job_id) => Plan::Skip(job_id),
    };
    tracing::debug!(job = name, ?plan, "resolved reconciliation plan");
    Ok(plan)
}

/// Carry out a [`Plan`] against the registry.
///
/// # Errors
///
/// Returns [`ReconcileError::Registry`] if the create or update call fails.
pub async fn apply<R: JobRegistry>(
    registry: &R,
    definition: &JobDefinition,
    plan: Plan,
) -> Result<Reconciliation, ReconcileError> {
    match plan {
        Plan::Create => {
            let job_id = registry.create_job(definition).await?;
            Ok(Reconciliation {
                action: Action::Created,
                job_id,
            })
        }
        Plan::Update(job_id) => {
            registry.update_job(&job_id, definition).await?;
            Ok(Reconciliation {
                action: Action::Updated,
                job_id: Some(job_id),
            })
        }
        Plan::Skip(job_id) => Ok(Reconciliation {
            action: Action::Skipped,
            job_id: Some(job_id),
        }),
    }
}

/// Make the registry hold `definition`, creating the job if its name is
/// unknown and replacing its settings only when `force_update` is set.
///
/// Matching is by exact `name`; see the module docs for what that means for
/// renamed jobs.
///
/// # Errors
///
/// - [`ReconcileError::MissingName`] if the definition has no usable `name`.
/// - [`ReconcileError::Registry`] if the create or update call fails.
pub async fn reconcile<R: JobRegistry>(
    registry: &R,
    definition: &JobDefinition,
    force_update: bool,
) -> Result<Reconciliation, ReconcileError> {
    let plan = plan(registry, definition, force_update).await?;
    apply(registry, definition, plan).await
}

fn find_existing(jobs: &[JobSummary], name: &str) -> Option<JobId> {
    let mut matches = jobs.iter().filter(|job| job.name == name);
    let first = matches.next()?;

    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            job = name,
            duplicates = extra + 1,
            job_id = %first.job_id,
            "registry holds several jobs with this name; using the first"
        );
    }

    Some(first.job_id.clone())
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;

use std::future::Future;

use crate::{JobDefinition, JobId, JobSummary, RegistryError, RunId};

/// Remote job registry as seen by the reconciler.
///
/// Implementations are expected to block (await) until the underlying call
/// completes; there is no cancellation.
pub trait JobRegistry: Send + Sync {
    /// List every job currently registered, in registry order.
    fn list_jobs(&self) -> impl Future<Output = Result<Vec<JobSummary>, RegistryError>> + Send;

    /// Create a job. `Ok(None)` means the registry accepted the job but did
    /// not report a usable identifier.
    fn create_job(
        &self,
        definition: &JobDefinition,
    ) -> impl Future<Output = Result<Option<JobId>, RegistryError>> + Send;

    /// Replace the settings of an existing job. The identifier is unchanged.
    fn update_job(
        &self,
        job_id: &JobId,
        definition: &JobDefinition,
    ) -> impl Future<Output = Result<(), RegistryError>> + Send;

    /// Trigger a run. `Ok(None)` means the run started but its handle was not
    /// readable.
    fn run_job(
        &self,
        job_id: &JobId,
    ) -> impl Future<Output = Result<Option<RunId>, RegistryError>> + Send;
}

//! Workspace UI links for jobs and runs.

use crate::{JobId, RunId};

/// `<host>/#job/<id>`, with any trailing slash on `host` dropped.
#[must_use]
pub fn job_url(host: &str, job_id: &JobId) -> String {
    format!("{}/#job/{job_id}", host.trim_end_matches('/'))
}

#[must_use]
pub fn run_url(job_url: &str, run_id: &RunId) -> String {
    format!("{job_url}/runs/{run_id}")
}

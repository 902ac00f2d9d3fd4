//! Typed decoding of the bridge's JSON output.

use jobsync_core::{JobId, JobSummary, RunId};
use serde::Deserialize;

/// `jobs list --output JSON`: the legacy CLI wraps entries in `{"jobs": [...]}`,
/// the current one prints a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListJobsResponse {
    Bare(Vec<JobEntry>),
    Envelope {
        #[serde(default)]
        jobs: Vec<JobEntry>,
    },
}

#[derive(Debug, Deserialize)]
struct JobEntry {
    job_id: Option<JobId>,
    #[serde(default)]
    settings: Option<JobSettings>,
}

#[derive(Debug, Deserialize)]
struct JobSettings {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateJobResponse {
    job_id: Option<JobId>,
}

#[derive(Debug, Deserialize)]
struct RunNowResponse {
    run_id: Option<RunId>,
}

/// Entries missing an id or a name cannot be matched and are dropped.
pub(crate) fn decode_job_list(stdout: &str) -> Result<Vec<JobSummary>, serde_json::Error> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries = match serde_json::from_str::<ListJobsResponse>(stdout)? {
        ListJobsResponse::Bare(jobs) | ListJobsResponse::Envelope { jobs } => jobs,
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let name = entry.settings.and_then(|s| s.name)?;
            Some(JobSummary {
                name,
                job_id: entry.job_id?,
            })
        })
        .collect())
}

pub(crate) fn decode_created(stdout: &str) -> Result<Option<JobId>, serde_json::Error> {
    serde_json::from_str::<CreateJobResponse>(stdout).map(|r| r.job_id)
}

pub(crate) fn decode_run(stdout: &str) -> Result<Option<RunId>, serde_json::Error> {
    serde_json::from_str::<RunNowResponse>(stdout).map(|r| r.run_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_accepts_envelope() {
        let body = r#"{"jobs": [
            {"job_id": 42, "settings": {"name": "ingest-daily", "timeout_seconds": 0}},
            {"job_id": 43, "settings": {"name": "score-hourly"}}
        ], "has_more": false}"#;
        let jobs = decode_job_list(body).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].name, "ingest-daily");
        assert_eq!(jobs[0].job_id, JobId::from(42));
    }

    #[test]
    fn list_accepts_bare_array() {
        let body = r#"[{"job_id": 7, "creator_user_name": "ci", "settings": {"name": "etl"}}]"#;
        let jobs = decode_job_list(body).unwrap();
        assert_eq!(
            jobs,
            vec![JobSummary {
                name: "etl".to_string(),
                job_id: JobId::from(7),
            }]
        );
    }

    #[test]
    fn list_of_empty_workspace() {
        assert!(decode_job_list("").unwrap().is_empty());
        assert!(decode_job_list("{}").unwrap().is_empty());
        assert!(decode_job_list("[]").unwrap().is_empty());
    }

    #[test]
    fn list_drops_unmatchable_entries() {
        let body = r#"{"jobs": [
            {"job_id": 1},
            {"settings": {"name": "orphan"}},
            {"job_id": 2, "settings": {}},
            {"job_id": 3, "settings": {"name": "kept"}}
        ]}"#;
        let jobs = decode_job_list(body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].name, "kept");
    }

    #[test]
    fn list_rejects_garbage() {
        assert!(decode_job_list("Error: not logged in").is_err());
    }

    #[test]
    fn created_id_read_from_job_id() {
        assert_eq!(decode_created(r#"{"job_id": 101}"#).unwrap(), Some(JobId::from(101)));
        assert_eq!(decode_created("{}").unwrap(), None);
        assert!(decode_created("").is_err());
    }

    #[test]
    fn run_id_read_from_run_id() {
        let run = decode_run(r#"{"run_id": 555, "number_in_job": 555}"#).unwrap();
        assert_eq!(run, Some(RunId::from(555)));
        assert!(decode_run("Run started").is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::source::types::{Release, RunJob, WorkflowRun};

#[derive(Deserialize)]
struct RunsPayload {
    workflow_runs: Vec<RunPayload>,
}

#[derive(Deserialize)]
struct RunPayload {
    id: u64,
    run_number: u64,
    head_branch: Option<String>,
    event: String,
    status: String,
    conclusion: Option<String>,
    html_url: String,
    jobs_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    run_started_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct JobsPayload {
    jobs: Vec<JobPayload>,
}

#[derive(Deserialize)]
struct JobPayload {
    name: String,
    status: String,
    conclusion: Option<String>,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct ReleasePayload {
    tag_name: String,
    name: Option<String>,
    html_url: String,
    published_at: Option<DateTime<Utc>>,
}

fn payload_error(url: &str, e: serde_json::Error) -> AppError {
    AppError::Payload {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

/// Map a workflow-runs listing into domain runs, keeping the API's
/// newest-first order.
pub fn map_workflow_runs(body: &serde_json::Value, url: &str) -> Result<Vec<WorkflowRun>> {
    let payload: RunsPayload =
        serde_json::from_value(body.clone()).map_err(|e| payload_error(url, e))?;
    Ok(payload.workflow_runs.into_iter().map(map_run).collect())
}

fn map_run(run: RunPayload) -> WorkflowRun {
    WorkflowRun {
        id: run.id,
        run_number: run.run_number,
        head_branch: run.head_branch.unwrap_or_default(),
        event: run.event,
        status: run.status,
        conclusion: run.conclusion,
        html_url: run.html_url,
        jobs_url: run.jobs_url,
        created_at: run.created_at,
        updated_at: run.updated_at,
        run_started_at: run.run_started_at,
    }
}

pub fn map_run_jobs(body: &serde_json::Value, url: &str) -> Result<Vec<RunJob>> {
    let payload: JobsPayload =
        serde_json::from_value(body.clone()).map_err(|e| payload_error(url, e))?;
    Ok(payload
        .jobs
        .into_iter()
        .map(|job| RunJob {
            name: job.name,
            status: job.status,
            conclusion: job.conclusion,
            html_url: job.html_url,
        })
        .collect())
}

pub fn map_release(body: &serde_json::Value, url: &str) -> Result<Release> {
    let payload: ReleasePayload =
        serde_json::from_value(body.clone()).map_err(|e| payload_error(url, e))?;
    Ok(Release {
        tag: payload.tag_name,
        name: payload.name,
        html_url: payload.html_url,
        published_at: payload.published_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_workflow_runs_keeps_order_and_null_conclusions() {
        let body = json!({
            "total_count": 2,
            "workflow_runs": [
                {
                    "id": 2, "run_number": 42, "head_branch": "main",
                    "event": "schedule", "status": "in_progress",
                    "conclusion": null,
                    "html_url": "https://github.com/o/r/actions/runs/2",
                    "jobs_url": "https://api.github.com/repos/o/r/actions/runs/2/jobs",
                    "created_at": "2024-05-30T00:00:00Z",
                    "updated_at": "2024-05-30T00:10:00Z",
                    "run_started_at": "2024-05-30T00:00:05Z"
                },
                {
                    "id": 1, "run_number": 41, "head_branch": null,
                    "event": "schedule", "status": "completed",
                    "conclusion": "success",
                    "html_url": "https://github.com/o/r/actions/runs/1",
                    "jobs_url": "https://api.github.com/repos/o/r/actions/runs/1/jobs",
                    "created_at": "2024-05-29T00:00:00Z",
                    "updated_at": "2024-05-29T00:10:00Z",
                    "run_started_at": null
                }
            ]
        });
        let runs = map_workflow_runs(&body, "http://test").unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, 2);
        assert!(runs[0].conclusion.is_none());
        assert_eq!(runs[1].conclusion.as_deref(), Some("success"));
        assert_eq!(runs[1].head_branch, "");
    }

    #[test]
    fn test_missing_workflow_runs_key_is_payload_error() {
        let body = json!({"total_count": 0});
        let err = map_workflow_runs(&body, "http://test").unwrap_err();
        assert!(matches!(err, AppError::Payload { .. }));
    }

    #[test]
    fn test_map_run_jobs() {
        let body = json!({
            "jobs": [
                {"name": "tests", "status": "completed", "conclusion": "failure",
                 "html_url": "https://github.com/o/r/actions/runs/1/job/9"},
                {"name": "lint", "status": "queued", "conclusion": null, "html_url": null}
            ]
        });
        let jobs = map_run_jobs(&body, "http://test").unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].conclusion.as_deref(), Some("failure"));
        assert!(jobs[1].conclusion.is_none());
        assert!(jobs[1].html_url.is_none());
    }

    #[test]
    fn test_map_release() {
        let body = json!({
            "tag_name": "v2.1.0",
            "name": "v2.1.0 bugfixes",
            "html_url": "https://github.com/o/r/releases/tag/v2.1.0",
            "published_at": "2024-04-01T08:00:00Z"
        });
        let release = map_release(&body, "http://test").unwrap();
        assert_eq!(release.tag, "v2.1.0");
        assert!(release.published_at.is_some());
    }

    #[test]
    fn test_release_without_tag_is_payload_error() {
        let body = json!({"html_url": "https://github.com/o/r/releases"});
        assert!(map_release(&body, "http://test").is_err());
    }
}

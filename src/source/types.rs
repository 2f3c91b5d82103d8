use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::streak::OutcomeEvent;
use crate::projects::{Project, Upstream};

pub const CONCLUSION_SUCCESS: &str = "success";
pub const CONCLUSION_FAILURE: &str = "failure";

/// One execution of a CI workflow. `conclusion` is open-ended: "success",
/// "failure", "cancelled", "skipped", or absent while the run is in
/// progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub run_number: u64,
    pub head_branch: String,
    pub event: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub html_url: String,
    pub jobs_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub run_started_at: Option<DateTime<Utc>>,
}

impl OutcomeEvent for WorkflowRun {
    fn outcome(&self) -> Option<&str> {
        self.conclusion.as_deref()
    }
}

/// One job within a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunJob {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub html_url: Option<String>,
}

/// The latest published release of a repository (drafts and prereleases
/// already excluded by the endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub tag: String,
    pub name: Option<String>,
    pub html_url: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// The latest version of a package on the index. `released_at` is absent
/// when the release has no uploaded files; `requires_upstream` is the
/// dist requirement naming the upstream package, when declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub released_at: Option<DateTime<Utc>>,
    pub requires_python: Option<String>,
    pub requires_upstream: Option<String>,
}

/// CI state of one project: run history (most-recent-first, as returned
/// by the API) plus the jobs of the newest run.
#[derive(Debug, Clone)]
pub struct CiStatus {
    pub runs: Vec<WorkflowRun>,
    pub latest_jobs: Vec<RunJob>,
}

/// Everything a build run collected about one project. Absent fields mean
/// either "nothing published yet" or "the lookup failed and was logged".
#[derive(Debug, Clone)]
pub struct ProjectStatus {
    pub project: Project,
    pub ci: Option<CiStatus>,
    pub release: Option<Release>,
    pub package: Option<PackageInfo>,
}

/// The full input to page rendering for one build run.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub upstream: Upstream,
    pub generated_at: DateTime<Utc>,
    pub projects: Vec<ProjectStatus>,
}

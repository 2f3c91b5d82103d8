pub mod github;
pub mod pypi;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::projects::Project;
use types::*;

/// Where the tracked projects live: run history, jobs, releases.
///
/// `Ok(None)` means the project has nothing there yet (no such workflow,
/// nothing released); an `Err` is a real lookup failure for the caller to
/// log.
#[async_trait]
pub trait ProjectHost: Send + Sync {
    /// Fetch the run history of the project's upstream-testing workflow,
    /// newest first.
    async fn workflow_runs(&self, project: &Project) -> Result<Option<Vec<WorkflowRun>>>;

    /// Fetch the jobs of one run via its jobs URL.
    async fn run_jobs(&self, jobs_url: &str) -> Result<Vec<RunJob>>;

    /// Fetch the latest non-draft, non-prerelease release.
    async fn latest_release(&self, project: &Project) -> Result<Option<Release>>;
}

/// The package index the tracked projects publish to.
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Fetch the latest published version of `package`, extracting its
    /// declared requirement on `upstream` when present.
    async fn package_info(&self, package: &str, upstream: &str) -> Result<Option<PackageInfo>>;
}

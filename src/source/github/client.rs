use std::sync::Arc;

use async_trait::async_trait;

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::fetch::CachedClient;
use crate::projects::Project;
use crate::source::types::*;
use crate::source::ProjectHost;

use super::mapper;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// GitHub REST implementation of [`ProjectHost`], all calls flowing
/// through the shared cached client.
pub struct GitHubSource {
    http: Arc<CachedClient>,
    config: GitHubConfig,
}

impl GitHubSource {
    pub fn new(http: Arc<CachedClient>, config: GitHubConfig) -> Self {
        Self { http, config }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Accept", ACCEPT.to_string()),
            ("X-GitHub-Api-Version", API_VERSION.to_string()),
        ];
        if let Some(token) = &self.config.token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        headers
    }

    async fn get(&self, url: &str) -> Result<serde_json::Value> {
        self.http.get_json(url, &self.headers()).await
    }
}

#[async_trait]
impl ProjectHost for GitHubSource {
    async fn workflow_runs(&self, project: &Project) -> Result<Option<Vec<WorkflowRun>>> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            self.config.api_base, project.org, project.repo, self.config.workflow
        );
        match self.get(&url).await {
            Ok(body) => Ok(Some(mapper::map_workflow_runs(&body, &url)?)),
            // The project has no such workflow.
            Err(AppError::UpstreamStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn run_jobs(&self, jobs_url: &str) -> Result<Vec<RunJob>> {
        let body = self.get(jobs_url).await?;
        mapper::map_run_jobs(&body, jobs_url)
    }

    async fn latest_release(&self, project: &Project) -> Result<Option<Release>> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.config.api_base, project.org, project.repo
        );
        match self.get(&url).await {
            Ok(body) => Ok(Some(mapper::map_release(&body, &url)?)),
            // Nothing released yet.
            Err(AppError::UpstreamStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::CachedClient;
use crate::projects::{Project, Roster};
use crate::render::{context, Renderer};
use crate::source::github::GitHubSource;
use crate::source::pypi::PyPiSource;
use crate::source::types::{CiStatus, ProjectStatus, StatusReport};
use crate::source::{PackageIndex, ProjectHost};

/// Everything one build run needs, created in `main` and alive for that
/// run only: configuration, the data sources and the build timestamp.
pub struct BuildContext {
    pub config: AppConfig,
    pub host: Box<dyn ProjectHost>,
    pub index: Box<dyn PackageIndex>,
    pub started_at: DateTime<Utc>,
}

impl BuildContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = Arc::new(CachedClient::new(&config.fetch)?);
        let host = Box::new(GitHubSource::new(Arc::clone(&http), config.github.clone()));
        let index = Box::new(PyPiSource::new(http, config.pypi.clone()));
        Ok(Self {
            config,
            host,
            index,
            started_at: Utc::now(),
        })
    }
}

#[derive(Debug)]
pub struct BuildSummary {
    pub projects: usize,
    pub pages_written: usize,
    pub fetch_failures: usize,
}

/// Run one full site build: load the roster, collect every project's
/// status, render every template into the output directory.
///
/// Source failures degrade to absent data and are counted; roster,
/// template and output I/O errors abort the build.
pub async fn build_site(ctx: &BuildContext) -> Result<BuildSummary> {
    let roster = Roster::load(&ctx.config.site.projects_file)?;
    let renderer = Renderer::from_dir(&ctx.config.site.templates_dir)?;

    let mut fetch_failures = 0;
    let mut projects = Vec::with_capacity(roster.projects.len());
    for project in &roster.projects {
        tracing::info!(project = %project.full_name(), "collecting project status");
        projects.push(collect_project(ctx, &roster, project, &mut fetch_failures).await);
    }

    let report = StatusReport {
        upstream: roster.upstream.clone(),
        generated_at: ctx.started_at,
        projects,
    };
    let view = context::report_view(&report, ctx.started_at);
    let data = serde_json::to_value(&view)?;

    let output_dir = &ctx.config.site.output_dir;
    std::fs::create_dir_all(output_dir)?;
    for page in renderer.pages() {
        let html = renderer.render_page(page, &data)?;
        std::fs::write(output_dir.join(page), html)?;
        tracing::info!(page = %page, "wrote page");
    }

    Ok(BuildSummary {
        projects: report.projects.len(),
        pages_written: renderer.pages().len(),
        fetch_failures,
    })
}

async fn collect_project(
    ctx: &BuildContext,
    roster: &Roster,
    project: &Project,
    fetch_failures: &mut usize,
) -> ProjectStatus {
    let (runs, release, package) = tokio::join!(
        ctx.host.workflow_runs(project),
        ctx.host.latest_release(project),
        async {
            match &project.package {
                Some(package) => {
                    ctx.index
                        .package_info(package, &roster.upstream.package)
                        .await
                }
                None => Ok(None),
            }
        },
    );

    let runs = absorb(runs, project, "workflow runs", fetch_failures).flatten();
    let release = absorb(release, project, "latest release", fetch_failures).flatten();
    let package = absorb(package, project, "package info", fetch_failures).flatten();

    let ci = match runs {
        Some(runs) => {
            let latest_jobs = match runs.first() {
                Some(latest) => {
                    absorb(
                        ctx.host.run_jobs(&latest.jobs_url).await,
                        project,
                        "run jobs",
                        fetch_failures,
                    )
                    .unwrap_or_default()
                }
                None => Vec::new(),
            };
            Some(CiStatus { runs, latest_jobs })
        }
        None => None,
    };

    ProjectStatus {
        project: project.clone(),
        ci,
        release,
        package,
    }
}

/// Log a failed lookup and carry on with absent data.
fn absorb<T>(
    result: Result<T>,
    project: &Project,
    what: &str,
    fetch_failures: &mut usize,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            *fetch_failures += 1;
            tracing::error!(project = %project.full_name(), what, error = %e, "lookup failed");
            None
        }
    }
}

//! View models handed to the page templates.
//!
//! Everything presentational lives here: CSS classes for conclusions and
//! freshness, formatted dates, streak summaries. The domain report stays
//! free of any of it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::freshness::{release_freshness, run_is_stale, Freshness};
use crate::analysis::streak::{compute_streak, Streak};
use crate::source::types::{
    CiStatus, PackageInfo, ProjectStatus, Release, StatusReport, WorkflowRun,
    CONCLUSION_FAILURE, CONCLUSION_SUCCESS,
};

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub upstream: UpstreamView,
    pub generated_at: String,
    pub projects: Vec<ProjectView>,
}

#[derive(Debug, Serialize)]
pub struct UpstreamView {
    pub name: String,
    pub package: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub org: String,
    pub repo: String,
    pub full_name: String,
    pub html_url: String,
    pub release: Option<ReleaseView>,
    pub package: Option<PackageView>,
    pub ci: Option<CiView>,
}

#[derive(Debug, Serialize)]
pub struct ReleaseView {
    pub tag: String,
    pub name: Option<String>,
    pub html_url: String,
    pub published_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PackageView {
    pub name: String,
    pub version: String,
    pub released_at: Option<String>,
    pub freshness_class: &'static str,
    pub requires_python: Option<String>,
    pub requires_upstream: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CiView {
    pub runs: Vec<RunView>,
    pub latest_run_stale: bool,
    pub jobs: Vec<JobView>,
    pub success_streak: StreakView,
    pub failure_streak: StreakView,
}

#[derive(Debug, Serialize)]
pub struct RunView {
    pub run_number: u64,
    pub conclusion: Option<String>,
    pub conclusion_class: &'static str,
    pub html_url: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct JobView {
    pub name: String,
    pub conclusion: Option<String>,
    pub conclusion_class: &'static str,
    pub html_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StreakView {
    pub length: usize,
    pub first: Option<RunRef>,
    pub last: Option<RunRef>,
}

#[derive(Debug, Serialize)]
pub struct RunRef {
    pub run_number: u64,
    pub html_url: String,
}

pub fn conclusion_class(conclusion: Option<&str>) -> &'static str {
    match conclusion {
        Some(CONCLUSION_SUCCESS) => "success",
        Some(CONCLUSION_FAILURE) => "danger",
        // Cancelled, skipped, and anything the API adds later.
        Some(_) => "warning",
        None => "secondary",
    }
}

fn freshness_class(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::Fresh => "success",
        Freshness::Aging => "warning",
        Freshness::Stale => "danger",
    }
}

fn date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn report_view(report: &StatusReport, now: DateTime<Utc>) -> ReportView {
    ReportView {
        upstream: UpstreamView {
            name: report.upstream.name.clone(),
            package: report.upstream.package.clone(),
        },
        generated_at: report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        projects: report
            .projects
            .iter()
            .map(|p| project_view(p, now))
            .collect(),
    }
}

fn project_view(status: &ProjectStatus, now: DateTime<Utc>) -> ProjectView {
    ProjectView {
        org: status.project.org.clone(),
        repo: status.project.repo.clone(),
        full_name: status.project.full_name(),
        html_url: status.project.html_url(),
        release: status.release.as_ref().map(release_view),
        package: status.package.as_ref().map(|p| package_view(p, now)),
        ci: status.ci.as_ref().map(|ci| ci_view(ci, now)),
    }
}

fn release_view(release: &Release) -> ReleaseView {
    ReleaseView {
        tag: release.tag.clone(),
        name: release.name.clone(),
        html_url: release.html_url.clone(),
        published_at: release.published_at.map(date),
    }
}

fn package_view(package: &PackageInfo, now: DateTime<Utc>) -> PackageView {
    let freshness = package
        .released_at
        .map(|released| release_freshness(released, now))
        // Nothing uploaded for the latest version, flag it.
        .unwrap_or(Freshness::Stale);
    PackageView {
        name: package.name.clone(),
        version: package.version.clone(),
        released_at: package.released_at.map(date),
        freshness_class: freshness_class(freshness),
        requires_python: package.requires_python.clone(),
        requires_upstream: package.requires_upstream.clone(),
    }
}

fn ci_view(ci: &CiStatus, now: DateTime<Utc>) -> CiView {
    let success_streak = compute_streak(&ci.runs, CONCLUSION_SUCCESS, CONCLUSION_FAILURE);
    let failure_streak = compute_streak(&ci.runs, CONCLUSION_FAILURE, CONCLUSION_SUCCESS);
    CiView {
        runs: ci
            .runs
            .iter()
            .map(|run| RunView {
                run_number: run.run_number,
                conclusion: run.conclusion.clone(),
                conclusion_class: conclusion_class(run.conclusion.as_deref()),
                html_url: run.html_url.clone(),
                updated_at: date(run.updated_at),
            })
            .collect(),
        latest_run_stale: ci
            .runs
            .first()
            .is_some_and(|run| run_is_stale(run.updated_at, now)),
        jobs: ci
            .latest_jobs
            .iter()
            .map(|job| JobView {
                name: job.name.clone(),
                conclusion: job.conclusion.clone(),
                conclusion_class: conclusion_class(job.conclusion.as_deref()),
                html_url: job.html_url.clone(),
            })
            .collect(),
        success_streak: streak_view(&success_streak),
        failure_streak: streak_view(&failure_streak),
    }
}

fn streak_view(streak: &Streak<'_, WorkflowRun>) -> StreakView {
    let run_ref = |run: &WorkflowRun| RunRef {
        run_number: run.run_number,
        html_url: run.html_url.clone(),
    };
    StreakView {
        length: streak.length,
        first: streak.first.map(run_ref),
        last: streak.last.map(run_ref),
    }
}

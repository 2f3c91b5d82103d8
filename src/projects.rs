use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The platform project the tracked ecosystem revolves around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upstream {
    pub name: String,
    pub package: String,
}

/// One tracked project: a GitHub repository plus an optional published package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub org: String,
    pub repo: String,
    #[serde(default)]
    pub package: Option<String>,
}

impl Project {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.org, self.repo)
    }
}

/// The YAML roster of projects a build run reports on.
#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub upstream: Upstream,
    pub projects: Vec<Project>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Roster(format!("failed to read {}: {e}", path.display()))
        })?;
        let roster: Roster = serde_yaml::from_str(&raw)?;
        roster.validate()?;
        Ok(roster)
    }

    fn validate(&self) -> Result<()> {
        if self.upstream.name.is_empty() || self.upstream.package.is_empty() {
            return Err(AppError::Roster(
                "upstream name and package must be non-empty".to_string(),
            ));
        }
        if self.projects.is_empty() {
            return Err(AppError::Roster("no projects listed".to_string()));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.org.is_empty() || project.repo.is_empty() {
                return Err(AppError::Roster(format!(
                    "project with empty org or repo: {:?}",
                    project
                )));
            }
            if !seen.insert(project.full_name()) {
                return Err(AppError::Roster(format!(
                    "duplicate project: {}",
                    project.full_name()
                )));
            }
        }
        Ok(())
    }
}

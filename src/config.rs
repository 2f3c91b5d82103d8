use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub pypi: PyPiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct GitHubConfig {
    #[serde(default = "default_github_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_workflow")]
    pub workflow: String,
}

// Manual Debug impl to avoid leaking the API token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("workflow", &self.workflow)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PyPiConfig {
    #[serde(default = "default_pypi_api_base")]
    pub api_base: String,
}

fn default_projects_file() -> PathBuf {
    PathBuf::from("projects.yaml")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_cache_max_age_secs() -> u64 {
    3600
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_workflow() -> String {
    "upstream_testing.yml".to_string()
}

fn default_pypi_api_base() -> String {
    "https://pypi.org/pypi".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects_file: default_projects_file(),
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            cache_dir: default_cache_dir(),
            cache_max_age_secs: default_cache_max_age_secs(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_api_base(),
            token: None,
            workflow: default_workflow(),
        }
    }
}

impl Default for PyPiConfig {
    fn default() -> Self {
        Self {
            api_base: default_pypi_api_base(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(
                config::File::with_name("barometer")
                    .required(false),
            );
        }

        // Environment variable overrides with BAROMETER_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("BAROMETER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }
}

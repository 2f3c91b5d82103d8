use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PyPiConfig;
use crate::error::{AppError, Result};
use crate::fetch::CachedClient;
use crate::source::types::PackageInfo;
use crate::source::PackageIndex;

use super::mapper;

/// PyPI JSON API implementation of [`PackageIndex`].
pub struct PyPiSource {
    http: Arc<CachedClient>,
    config: PyPiConfig,
}

impl PyPiSource {
    pub fn new(http: Arc<CachedClient>, config: PyPiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl PackageIndex for PyPiSource {
    async fn package_info(&self, package: &str, upstream: &str) -> Result<Option<PackageInfo>> {
        let url = format!("{}/{}/json", self.config.api_base, package);
        let headers = [("Accept", "application/json".to_string())];
        match self.http.get_json(&url, &headers).await {
            Ok(body) => Ok(Some(mapper::map_package_info(&body, &url, upstream)?)),
            // Package not published under that name.
            Err(AppError::UpstreamStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
